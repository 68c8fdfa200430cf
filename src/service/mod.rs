//! Service layer: business logic orchestration.
//!
//! [`EventoService`] coordinates event operations, applies the shared
//! transition predicate from [`crate::domain::transition`], and emits
//! notifications through the [`crate::domain::EventBus`].

pub mod evento_service;

pub use evento_service::{EventoService, SweepSummary};
