//! Placeholder HTTP backend for the Legal AI chat front-end.
//!
//! Every endpoint answers with a fixed JSON payload. The only per-request
//! variability is the optional `user_id` echoed by `/chat`.
//!
//! # Endpoints
//!
//! ```text
//! GET  /          service status and version
//! GET  /health    health check
//! POST /chat      "coming soon" advisory, echoes user_id
//! GET  /features  available and planned features
//! GET  /docs      interactive API docs (/openapi.json for the raw document)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Service and HTTP error types
//! - [`chat`]: Chat request validation and placeholder reply
//! - [`api`]: Router, handlers and OpenAPI document
//! - [`metrics`]: Request counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use api::App;
pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
