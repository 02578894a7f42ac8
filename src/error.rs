//! Unified error types for the backend.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors raised while starting or running the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One step of a validation error location: a field name or a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LocItem {
    /// Field name, or `body` for the request body itself.
    Key(String),
    /// Character offset or array index.
    Index(usize),
}

impl From<&str> for LocItem {
    fn from(key: &str) -> Self {
        LocItem::Key(key.to_string())
    }
}

impl PartialEq<&str> for LocItem {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, LocItem::Key(key) if key == other)
    }
}

/// One problem found in a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationIssue {
    /// Machine-readable kind, e.g. `missing` or `string_type`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Path to the offending value, starting at `body`.
    pub loc: Vec<LocItem>,
    /// Human-readable description.
    pub msg: String,
}

impl ValidationIssue {
    /// Create an issue located under the request body.
    pub fn new(kind: &'static str, path: &[&str], msg: impl Into<String>) -> Self {
        let loc = std::iter::once("body")
            .chain(path.iter().copied())
            .map(LocItem::from)
            .collect();

        Self {
            kind,
            loc,
            msg: msg.into(),
        }
    }

    /// Append a position to the location.
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.loc.push(LocItem::Index(offset));
        self
    }
}

/// Body of a `422 Unprocessable Entity` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Every problem found in the request.
    pub detail: Vec<ValidationIssue>,
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body did not match the expected shape.
    #[error("request validation failed: {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// No route matches the path.
    #[error("not found")]
    NotFound,

    /// Route exists but not for this method.
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { detail }),
            )
                .into_response(),
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response()
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "detail": "Method Not Allowed" })),
            )
                .into_response(),
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
