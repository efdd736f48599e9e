//! Post CRUD handlers: list, get one, create, update, delete.
//!
//! Each handler validates first, then talks to the store, then serializes;
//! any failure short-circuits into an `AppError` response.

use crate::error::AppError;
use crate::model::{ListParams, Post};
use crate::state::AppState;
use crate::validation::{validate_create, validate_list, validate_update};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct DeleteConfirmation {
    pub message: &'static str,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Post>>, AppError> {
    let spec = validate_list(&params)?;
    let posts = state.store.list(&spec).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .store
        .fetch(id)
        .await?
        .ok_or(AppError::PostNotFound(id))?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let new_post = validate_create(&body)?;
    let created = state.store.create(&new_post).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Post>, AppError> {
    let patch = validate_update(&body)?;
    let updated = state
        .store
        .update(id, &patch)
        .await?
        .ok_or(AppError::PostNotFound(id))?;
    Ok(Json(updated))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteConfirmation>, AppError> {
    if !state.store.delete(id).await? {
        return Err(AppError::PostNotFound(id));
    }
    Ok(Json(DeleteConfirmation {
        message: "Post deleted successfully",
    }))
}
