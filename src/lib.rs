//! # evento-gateway
//!
//! REST API and WebSocket gateway for rental-event lifecycle status
//! management.
//!
//! This crate owns the status model for "eventos" — scheduled rental
//! bookings with a `[inicio, fim)` window. Its central responsibility is
//! keeping every event's persisted status consistent with wall-clock
//! time, through two converging mechanisms sharing one transition
//! predicate: a scheduler-invoked bulk sweep and an opportunistic
//! per-view synchronizer.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)          External scheduler
//!     │                                   │
//!     ├── REST Handlers (api/)  ◄─────────┘  POST /sweep
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventoService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── transition predicate (domain/)
//!     │
//!     └── PostgreSQL (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
