//! Request validation. Everything is checked and trimmed here, before any
//! store access; rules apply in a fixed order and the first failure wins.

use crate::error::AppError;
use crate::model::ListParams;
use crate::sql::{SortField, SortOrder};
use serde_json::{Map, Value};

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validated listing parameters: trimmed search term (absent when empty or
/// whitespace-only) and the resolved sort spec.
#[derive(Clone, Debug, Default)]
pub struct ListSpec {
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// A validated create body: trimmed, non-empty title and content.
#[derive(Clone, Debug)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// A validated partial update: at least one field present, all trimmed.
#[derive(Clone, Debug, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub fn validate_list(params: &ListParams) -> Result<ListSpec, AppError> {
    let search = match &params.q {
        Some(q) => {
            let q = q.trim();
            if q.chars().count() > MAX_SEARCH_LENGTH {
                return Err(AppError::InvalidInput("search term too long".into()));
            }
            if q.is_empty() {
                None
            } else {
                Some(q.to_string())
            }
        }
        None => None,
    };

    let sort_by = match &params.sort_by {
        Some(s) => SortField::parse(s)
            .ok_or_else(|| AppError::InvalidInput("invalid sort field".into()))?,
        None => SortField::default(),
    };

    let sort_order = match &params.sort_order {
        Some(s) => SortOrder::parse(s)
            .ok_or_else(|| AppError::InvalidInput("invalid sort order".into()))?,
        None => SortOrder::default(),
    };

    Ok(ListSpec {
        search,
        sort_by,
        sort_order,
    })
}

/// Validate a create body: both fields required and non-null, then trimmed
/// and bounded.
pub fn validate_create(body: &Value) -> Result<NewPost, AppError> {
    let map = as_object(body)?;
    let title = field_text(map, "title")?
        .ok_or_else(|| AppError::InvalidInput("title is required".into()))?;
    let content = field_text(map, "content")?
        .ok_or_else(|| AppError::InvalidInput("content is required".into()))?;
    Ok(NewPost {
        title: checked_title(title)?,
        content: checked_content(content)?,
    })
}

/// Validate an update body: fields may be omitted, but at least one must be
/// present; present fields obey the create rules.
pub fn validate_update(body: &Value) -> Result<PostPatch, AppError> {
    let map = as_object(body)?;
    let mut patch = PostPatch::default();
    if let Some(raw) = field_text(map, "title")? {
        patch.title = Some(checked_title(raw)?);
    }
    if let Some(raw) = field_text(map, "content")? {
        patch.content = Some(checked_content(raw)?);
    }
    if patch.title.is_none() && patch.content.is_none() {
        return Err(AppError::InvalidInput("no fields to update".into()));
    }
    Ok(patch)
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, AppError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::InvalidInput("body must be a JSON object".into())),
    }
}

/// A string field from the body: absent and null are both None; any other
/// non-string type is rejected.
fn field_text<'a>(map: &'a Map<String, Value>, field: &str) -> Result<Option<&'a str>, AppError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(AppError::InvalidInput(format!(
            "{} must be a string",
            field
        ))),
    }
}

fn checked_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if title.is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".into()));
    }
    Ok(title.to_string())
}

fn checked_content(raw: &str) -> Result<String, AppError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(AppError::InvalidInput("content cannot be empty".into()));
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(q: Option<&str>, sort_by: Option<&str>, sort_order: Option<&str>) -> ListParams {
        ListParams {
            q: q.map(String::from),
            sort_by: sort_by.map(String::from),
            sort_order: sort_order.map(String::from),
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::InvalidInput(m) => m,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn list_defaults_to_created_at_desc() {
        let spec = validate_list(&params(None, None, None)).unwrap();
        assert_eq!(spec.search, None);
        assert_eq!(spec.sort_by, SortField::CreatedAt);
        assert_eq!(spec.sort_order, SortOrder::Desc);
    }

    #[test]
    fn whitespace_only_search_means_no_filter() {
        let spec = validate_list(&params(Some("   "), None, None)).unwrap();
        assert_eq!(spec.search, None);
    }

    #[test]
    fn search_term_is_trimmed() {
        let spec = validate_list(&params(Some("  hello  "), None, None)).unwrap();
        assert_eq!(spec.search.as_deref(), Some("hello"));
    }

    #[test]
    fn search_term_over_100_chars_rejected() {
        let long = "x".repeat(101);
        let err = validate_list(&params(Some(&long), None, None)).unwrap_err();
        assert_eq!(message(err), "search term too long");
    }

    #[test]
    fn search_term_of_exactly_100_chars_allowed() {
        let term = "x".repeat(100);
        let spec = validate_list(&params(Some(&term), None, None)).unwrap();
        assert_eq!(spec.search.as_deref(), Some(term.as_str()));
    }

    #[test]
    fn search_length_counts_chars_after_trim() {
        let padded = format!("   {}   ", "x".repeat(100));
        assert!(validate_list(&params(Some(&padded), None, None)).is_ok());
    }

    #[test]
    fn search_failure_wins_over_bad_sort() {
        let long = "x".repeat(101);
        let err = validate_list(&params(Some(&long), Some("bogus"), Some("bogus"))).unwrap_err();
        assert_eq!(message(err), "search term too long");
    }

    #[test]
    fn sort_field_outside_allow_list_rejected() {
        let err = validate_list(&params(None, Some("id"), None)).unwrap_err();
        assert_eq!(message(err), "invalid sort field");
    }

    #[test]
    fn sort_field_failure_wins_over_bad_order() {
        let err = validate_list(&params(None, Some("id"), Some("bogus"))).unwrap_err();
        assert_eq!(message(err), "invalid sort field");
    }

    #[test]
    fn sort_by_title_accepted() {
        let spec = validate_list(&params(None, Some("title"), None)).unwrap();
        assert_eq!(spec.sort_by, SortField::Title);
    }

    #[test]
    fn sort_order_is_case_insensitive() {
        let spec = validate_list(&params(None, None, Some("ASC"))).unwrap();
        assert_eq!(spec.sort_order, SortOrder::Asc);
    }

    #[test]
    fn unknown_sort_order_rejected() {
        let err = validate_list(&params(None, None, Some("sideways"))).unwrap_err();
        assert_eq!(message(err), "invalid sort order");
    }

    #[test]
    fn create_requires_title() {
        let err = validate_create(&json!({"content": "World"})).unwrap_err();
        assert_eq!(message(err), "title is required");
    }

    #[test]
    fn create_treats_null_as_missing() {
        let err = validate_create(&json!({"title": null, "content": "World"})).unwrap_err();
        assert_eq!(message(err), "title is required");
    }

    #[test]
    fn create_requires_content() {
        let err = validate_create(&json!({"title": "Hello"})).unwrap_err();
        assert_eq!(message(err), "content is required");
    }

    #[test]
    fn create_trims_both_fields() {
        let post = validate_create(&json!({"title": "  Hello ", "content": " World  "})).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
    }

    #[test]
    fn create_rejects_title_over_200_chars() {
        let long = "x".repeat(201);
        let err = validate_create(&json!({"title": long, "content": "World"})).unwrap_err();
        assert_eq!(message(err), "title must be at most 200 characters");
    }

    #[test]
    fn create_accepts_title_of_exactly_200_chars() {
        let title = "x".repeat(200);
        assert!(validate_create(&json!({"title": title, "content": "World"})).is_ok());
    }

    #[test]
    fn create_rejects_whitespace_only_fields() {
        let err = validate_create(&json!({"title": "   ", "content": "World"})).unwrap_err();
        assert_eq!(message(err), "title cannot be empty");
        let err = validate_create(&json!({"title": "Hello", "content": "  "})).unwrap_err();
        assert_eq!(message(err), "content cannot be empty");
    }

    #[test]
    fn create_rejects_non_string_fields() {
        let err = validate_create(&json!({"title": 3, "content": "World"})).unwrap_err();
        assert_eq!(message(err), "title must be a string");
    }

    #[test]
    fn create_rejects_non_object_body() {
        let err = validate_create(&json!(["Hello"])).unwrap_err();
        assert_eq!(message(err), "body must be a JSON object");
        let err = validate_create(&Value::Null).unwrap_err();
        assert_eq!(message(err), "body must be a JSON object");
    }

    #[test]
    fn update_with_title_only_leaves_content_unset() {
        let patch = validate_update(&json!({"title": "Hello"})).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Hello"));
        assert_eq!(patch.content, None);
    }

    #[test]
    fn update_with_content_only() {
        let patch = validate_update(&json!({"content": "World2"})).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.content.as_deref(), Some("World2"));
    }

    #[test]
    fn update_rejects_empty_body() {
        let err = validate_update(&json!({})).unwrap_err();
        assert_eq!(message(err), "no fields to update");
    }

    #[test]
    fn update_rejects_all_null_body() {
        let err = validate_update(&json!({"title": null, "content": null})).unwrap_err();
        assert_eq!(message(err), "no fields to update");
    }

    #[test]
    fn update_validates_present_fields() {
        let err = validate_update(&json!({"title": "   "})).unwrap_err();
        assert_eq!(message(err), "title cannot be empty");
        let long = "x".repeat(201);
        let err = validate_update(&json!({"title": long})).unwrap_err();
        assert_eq!(message(err), "title must be at most 200 characters");
    }

    #[test]
    fn update_rejects_non_object_body() {
        let err = validate_update(&Value::Null).unwrap_err();
        assert_eq!(message(err), "body must be a JSON object");
    }
}
