//! Postboard: REST backend for posts with search and sortable listing.

pub mod error;
pub mod migration;
pub mod model;
pub mod sql;
pub mod state;
pub mod store;
pub mod validation;
pub mod handlers;
pub mod routes;

pub use error::AppError;
pub use migration::{apply_migrations, ensure_database_exists};
pub use model::{ListParams, Post};
pub use routes::{common_routes, post_routes};
pub use state::AppState;
pub use store::PostStore;
pub use validation::{ListSpec, NewPost, PostPatch};
