//! Domain events reflecting event-record mutations.
//!
//! Every mutation emits a [`DomainEvent`] through the [`super::EventBus`].
//! Events are broadcast to WebSocket subscribers so that any client
//! holding a cached view of the affected record can refetch it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::evento_id::EventoId;
use super::status::EventoStatus;
use super::timeline::Actor;

/// Domain event emitted after every event-record mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Emitted when a new event is registered.
    EventoCreated {
        /// Event identifier.
        evento_id: EventoId,
        /// Event name.
        nome: String,
        /// Initial lifecycle status.
        status: EventoStatus,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after any status change, automatic or user-driven.
    ///
    /// This is the cache invalidation signal: subscribers viewing the
    /// event should refetch it.
    StatusChanged {
        /// Event identifier.
        evento_id: EventoId,
        /// Status before the change.
        from: EventoStatus,
        /// Status after the change.
        to: EventoStatus,
        /// Who performed the change.
        actor: Actor,
        /// When the change was applied.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when an event is archived.
    EventoArchived {
        /// Event identifier.
        evento_id: EventoId,
        /// Archival timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Returns the event-record ID associated with this notification.
    #[must_use]
    pub fn evento_id(&self) -> EventoId {
        match self {
            Self::EventoCreated { evento_id, .. }
            | Self::StatusChanged { evento_id, .. }
            | Self::EventoArchived { evento_id, .. } => *evento_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::EventoCreated { .. } => "evento_created",
            Self::StatusChanged { .. } => "status_changed",
            Self::EventoArchived { .. } => "evento_archived",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn created_event_type() {
        let event = DomainEvent::EventoCreated {
            evento_id: EventoId::new(),
            nome: "Casamento Silva".to_string(),
            status: EventoStatus::Confirmado,
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type_str(), "evento_created");
    }

    #[test]
    fn status_changed_serializes_actor_kind() {
        let event = DomainEvent::StatusChanged {
            evento_id: EventoId::new(),
            from: EventoStatus::Confirmado,
            to: EventoStatus::EmExecucao,
            actor: Actor::AutomatedSweep,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("status_changed"));
        assert!(json.contains("em_execucao"));
        assert!(json.contains("sweep"));
    }

    #[test]
    fn evento_id_accessor() {
        let id = EventoId::new();
        let event = DomainEvent::EventoArchived {
            evento_id: id,
            timestamp: Utc::now(),
        };
        assert_eq!(event.evento_id(), id);
    }
}
