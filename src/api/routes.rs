//! HTTP API route definitions.

use axum::http::HeaderValue;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::docs::swagger_ui;
use super::handlers::{chat, features, health, method_not_allowed, not_found, root, AppState};
use crate::config::Config;
use crate::error::ServiceError;
use crate::metrics::track_requests;
use crate::utils::shutdown_signal;

/// The assembled service: route bindings plus the cross-origin allow-list.
#[derive(Debug, Clone)]
pub struct App {
    state: AppState,
    allowed_origins: Vec<HeaderValue>,
}

impl App {
    /// Build the application from validated configuration.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let allowed_origins = config
            .allowed_origin_headers()
            .map_err(ServiceError::InvalidConfig)?;

        Ok(Self {
            state: AppState::new(config.health_clock),
            allowed_origins,
        })
    }

    /// Origins allowed to make browser requests.
    pub fn allowed_origins(&self) -> &[HeaderValue] {
        &self.allowed_origins
    }

    /// Router serving every endpoint.
    pub fn router(&self) -> Router {
        create_router(self.state, self.allowed_origins.clone())
    }

    /// Serve on `listener` until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServiceError> {
        info!("HTTP server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("HTTP server stopped");
        Ok(())
    }
}

/// CORS policy for the allow-list. Methods and headers are mirrored from the
/// preflight request since credentials rule out wildcards.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the API router.
pub fn create_router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        // Status endpoints
        .route("/", get(root).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        // Chat endpoint
        .route("/chat", post(chat).fallback(method_not_allowed))
        // Info endpoint
        .route("/features", get(features).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
        .merge(swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}
