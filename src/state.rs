//! Shared application state for all routes.

use crate::store::PostStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PostStore,
}
