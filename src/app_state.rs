//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::DispatchService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dispatch service shared by every websocket connection.
    pub dispatch_service: Arc<DispatchService>,
}

impl AppState {
    /// Wraps a dispatch service for sharing across handlers.
    #[must_use]
    pub fn new(dispatch_service: DispatchService) -> Self {
        Self {
            dispatch_service: Arc::new(dispatch_service),
        }
    }
}
