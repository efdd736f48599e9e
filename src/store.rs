//! PostgreSQL-backed post store. Every write runs in a single transaction
//! that is rolled back before the error surfaces.

use crate::model::Post;
use crate::sql::{self, POST_COLUMNS};
use crate::validation::{ListSpec, NewPost, PostPatch};
use sqlx::PgPool;

#[derive(Clone)]
pub struct PostStore {
    pool: PgPool,
}

impl PostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip probe used by the readiness route.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    pub async fn list(&self, spec: &ListSpec) -> Result<Vec<Post>, sqlx::Error> {
        let q = sql::list_query(spec);
        tracing::debug!(sql = %q.sql, pattern = ?q.pattern, "query");
        let mut query = sqlx::query_as::<_, Post>(&q.sql);
        if let Some(pattern) = &q.pattern {
            query = query.bind(pattern);
        }
        query.fetch_all(&self.pool).await
    }

    pub async fn fetch(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Insert one post. Both timestamps come from the same statement, so
    /// `created_at == updated_at` on the returned row.
    pub async fn create(&self, post: &NewPost) -> Result<Post, sqlx::Error> {
        let sql = format!(
            "INSERT INTO posts (title, content) VALUES ($1, $2) RETURNING {}",
            POST_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, Post>(&sql)
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Update the fields present in the patch, refreshing `updated_at`.
    /// Returns None when no row has the id.
    pub async fn update(&self, id: i64, patch: &PostPatch) -> Result<Option<Post>, sqlx::Error> {
        let sql = sql::update_query(patch);
        tracing::debug!(sql = %sql, id, "query");
        let mut tx = self.pool.begin().await?;
        let mut query = sqlx::query_as::<_, Post>(&sql);
        if let Some(title) = &patch.title {
            query = query.bind(title);
        }
        if let Some(content) = &patch.content {
            query = query.bind(content);
        }
        let updated = query.bind(id).fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Delete by id. Returns false when no row has the id.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = "DELETE FROM posts WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
