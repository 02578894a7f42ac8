//! OpenAPI document and interactive docs.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;

/// Path of the interactive documentation.
pub const DOCS_PATH: &str = "/docs";
/// Path of the raw OpenAPI document.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI description of the HTTP surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Legal AI Backend",
        description = "API for legal AI chat without document upload functionality.",
        version = "2.0.0"
    ),
    paths(handlers::root, handlers::health, handlers::chat, handlers::features),
    tags(
        (name = "Status", description = "Liveness and health"),
        (name = "Chat", description = "Chat placeholder"),
        (name = "Info", description = "Feature roadmap")
    )
)]
pub struct ApiDoc;

/// Swagger UI serving [`ApiDoc`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi())
}
