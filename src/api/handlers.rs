//! HTTP API handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::chat::{ChatMessage, ChatResponse};
use crate::config::HealthClock;
use crate::error::{ApiError, ValidationErrorResponse};
use crate::metrics;

/// Version reported by the root endpoint and the OpenAPI document.
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timestamp published by `/health` under [`HealthClock::Fixed`].
pub const FIXED_HEALTH_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

/// Application state shared with handlers. Immutable after startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    /// Timestamp source for `/health`.
    pub health_clock: HealthClock,
}

impl AppState {
    /// Create new app state.
    pub fn new(health_clock: HealthClock) -> Self {
        Self { health_clock }
    }
}

impl HealthClock {
    /// Timestamp to report, RFC 3339 in UTC.
    pub fn timestamp(self) -> String {
        match self {
            HealthClock::Fixed => FIXED_HEALTH_TIMESTAMP.to_string(),
            HealthClock::Live => {
                let now = OffsetDateTime::now_utc();
                let now = now.replace_nanosecond(0).unwrap_or(now);
                now.format(&Rfc3339)
                    .unwrap_or_else(|_| FIXED_HEALTH_TIMESTAMP.to_string())
            }
        }
    }
}

/// Root status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting.
    pub message: &'static str,
    /// Always "OK".
    pub status: &'static str,
    /// API version.
    pub version: &'static str,
    /// Enabled capabilities.
    pub features: Vec<&'static str>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: &'static str,
    /// Human-readable summary.
    pub message: &'static str,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// Feature list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeaturesResponse {
    /// Features usable today.
    pub available_features: Vec<&'static str>,
    /// Announced features.
    pub coming_soon: Vec<&'static str>,
    /// Closing note.
    pub message: &'static str,
}

/// Root endpoint to check if the service is running.
#[utoipa::path(
    get,
    path = "/",
    tag = "Status",
    responses((status = 200, description = "Service is running", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Legal AI Backend is running!",
        status: "OK",
        version: API_VERSION,
        features: vec!["chat", "legal-ai"],
    })
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Status",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "All systems operational",
        timestamp: state.health_clock.timestamp(),
    })
}

/// Chat placeholder. Echoes `user_id` with a fixed advisory.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatMessage,
    responses(
        (status = 200, description = "Placeholder reply", body = ChatResponse),
        (status = 422, description = "Request body failed validation", body = ValidationErrorResponse)
    )
)]
pub async fn chat(headers: HeaderMap, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let content_type = headers.get(header::CONTENT_TYPE);
    let message = ChatMessage::from_request(content_type, &body).map_err(|issues| {
        warn!(issues = issues.len(), "Rejected chat request");
        metrics::inc_validation_failures();
        ApiError::Validation(issues)
    })?;

    debug!(user_id = ?message.user_id, "Chat request accepted");
    metrics::inc_chat_requests();
    Ok(Json(message.reply()))
}

/// Returns information about available and upcoming features.
#[utoipa::path(
    get,
    path = "/features",
    tag = "Info",
    responses((status = 200, description = "Feature roadmap", body = FeaturesResponse))
)]
pub async fn features() -> Json<FeaturesResponse> {
    Json(FeaturesResponse {
        available_features: vec!["Basic chat functionality", "Health monitoring"],
        coming_soon: vec![
            "Document upload and analysis",
            "Legal document review",
            "Multi-format file support",
            "Advanced AI responses",
        ],
        message: "Stay tuned for exciting updates!",
    })
}

/// Fallback for paths without a route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths called with the wrong method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
