//! Safe SQL construction for the posts table: identifiers come only from the
//! allow-list enums below, user-supplied values only as bind parameters.

use crate::validation::{ListSpec, PostPatch};

pub const POST_COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Sortable public fields. The only way a sort column enters SQL text.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
}

impl SortField {
    /// Parse a public field name. Anything outside the allow-list is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(SortField::CreatedAt),
            "title" => Some(SortField::Title),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Title => "title",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Case-insensitive parse of `asc`/`desc`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A listing SELECT plus its single optional bind parameter.
pub struct ListQuery {
    pub sql: String,
    pub pattern: Option<String>,
}

/// Build the listing SELECT from a validated `ListSpec`. A present search term
/// becomes one `%term%` parameter matched case-insensitively against title
/// and content; sort column and direction are resolved through the enums.
pub fn list_query(spec: &ListSpec) -> ListQuery {
    let mut sql = format!("SELECT {} FROM posts", POST_COLUMNS);
    let pattern = spec.search.as_ref().map(|term| {
        sql.push_str(" WHERE title ILIKE $1 OR content ILIKE $1");
        format!("%{}%", term)
    });
    sql.push_str(&format!(
        " ORDER BY {} {}",
        spec.sort_by.column(),
        spec.sort_order.sql()
    ));
    ListQuery { sql, pattern }
}

/// Build the partial UPDATE for the fields present in the patch, refreshing
/// `updated_at`. Placeholders are numbered in field order, id last; the
/// caller binds in the same order. The validator guarantees a non-empty patch.
pub fn update_query(patch: &PostPatch) -> String {
    let mut sets = Vec::new();
    let mut n = 0;
    if patch.title.is_some() {
        n += 1;
        sets.push(format!("title = ${}", n));
    }
    if patch.content.is_some() {
        n += 1;
        sets.push(format!("content = ${}", n));
    }
    sets.push("updated_at = NOW()".to_string());
    format!(
        "UPDATE posts SET {} WHERE id = ${} RETURNING {}",
        sets.join(", "),
        n + 1,
        POST_COLUMNS
    )
}
