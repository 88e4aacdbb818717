//! System endpoints: health check and request-type catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::RequestKind;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Supported request type info.
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestTypeInfo {
    request_type: &'static str,
    description: &'static str,
    command: String,
    takes_stdin: bool,
}

/// `GET /config/request-types` — List request types and their commands.
#[utoipa::path(
    get,
    path = "/config/request-types",
    tag = "System",
    summary = "List supported request types",
    description = "Returns every websocket request type with the command line it runs.",
    responses(
        (status = 200, description = "Request type catalog", body = Vec<RequestTypeInfo>),
    )
)]
pub async fn request_types_handler(State(state): State<AppState>) -> impl IntoResponse {
    let types: Vec<RequestTypeInfo> = RequestKind::ALL
        .into_iter()
        .map(|kind| RequestTypeInfo {
            request_type: kind.as_str(),
            description: match kind {
                RequestKind::Randomization => "Generate a randomized arena layout",
                RequestKind::Simulation => "Run a simulation of the submitted request",
            },
            command: state.dispatch_service.command_for(kind).to_string(),
            takes_stdin: kind.takes_stdin(),
        })
        .collect();
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/request-types", get(request_types_handler))
}
