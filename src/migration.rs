//! First-run DDL: database creation and the posts table.

use crate::error::AppError;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const POSTS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id          BIGSERIAL PRIMARY KEY,
    title       VARCHAR(200) NOT NULL,
    content     TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Create the posts table if missing. Idempotent.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(POSTS_DDL).execute(pool).await?;
    Ok(())
}

/// Create the target database when it does not exist yet. Connects to the
/// server's `postgres` database for the existence check.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::InvalidInput(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn quote_ident(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::InvalidInput("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}postgres", url.get(..path_start).unwrap_or(url));
    Ok((admin_url, db_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_url_into_admin_url_and_name() {
        let (admin, name) =
            parse_db_name_from_url("postgres://localhost:5432/postboard").unwrap();
        assert_eq!(admin, "postgres://localhost:5432/postgres");
        assert_eq!(name, "postboard");
    }

    #[test]
    fn drops_query_string_from_name() {
        let (_, name) =
            parse_db_name_from_url("postgres://localhost/postboard?sslmode=disable").unwrap();
        assert_eq!(name, "postboard");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("postboard"), "\"postboard\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
