//! HTTP handlers for the posts API.

pub mod posts;
