//! Post CRUD routes.

use crate::handlers::posts::{create_post, delete_post, get_post, list_posts, update_post};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(state)
}
