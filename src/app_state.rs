//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::EventoService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event service for all business logic.
    pub evento_service: Arc<EventoService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
