//! HTTP API: status, health, chat and feature endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, App};
