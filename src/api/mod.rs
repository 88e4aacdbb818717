//! HTTP API layer: system endpoints and OpenAPI document.

pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the HTTP endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "sim-gateway", description = "WebSocket gateway for the randomization and simulation tools"),
    paths(
        handlers::system::health_handler,
        handlers::system::request_types_handler,
    ),
    components(schemas(handlers::system::HealthResponse, handlers::system::RequestTypeInfo)),
    tags((name = "System", description = "Health and configuration"))
)]
pub struct ApiDoc;

/// Builds the HTTP router (websocket routes are added in
/// [`crate::server::build_app`]).
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
