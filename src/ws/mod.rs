//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` delivers status-change notifications
//! so clients holding cached views of an event know to refetch it.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
