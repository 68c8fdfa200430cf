//! Domain layer: event identity, lifecycle status, timeline, and event system.
//!
//! This module contains the server-side domain model: event identity and
//! aggregate, the lifecycle status enum, the shared automatic-transition
//! predicate, the append-only timeline types, and the broadcast bus that
//! carries invalidation notifications to WebSocket subscribers.

pub mod domain_event;
pub mod event_bus;
pub mod evento;
pub mod evento_id;
pub mod status;
pub mod timeline;
pub mod transition;

pub use domain_event::DomainEvent;
pub use event_bus::EventBus;
pub use evento::{Evento, EventoSummary};
pub use evento_id::EventoId;
pub use status::EventoStatus;
pub use timeline::{Actor, TimelineEntry, TimelineKind};
pub use transition::{Transition, TransitionKind, due_transition};
