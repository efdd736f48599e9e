//! Router assembly.

mod common;
mod posts;

pub use common::common_routes;
pub use posts::post_routes;
