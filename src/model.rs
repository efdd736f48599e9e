//! The post entity and request parameter types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored post. Timestamps are assigned by the database and serialize as
/// RFC 3339 strings.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters of the listing endpoint. Sort keys are camelCase on the
/// wire, snake_case internally.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}
