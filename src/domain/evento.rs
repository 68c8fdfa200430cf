//! Event aggregate combining the scheduled window with lifecycle metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::evento_id::EventoId;
use super::status::EventoStatus;

/// A rental event tracked by the gateway.
///
/// The scheduled window `[inicio, fim)` drives the automatic status
/// transitions; all other fields are operational metadata. Archived
/// events are excluded from every automatic path.
#[derive(Debug, Clone, Serialize)]
pub struct Evento {
    /// Unique identifier (immutable after registration).
    pub id: EventoId,

    /// Human-readable event name.
    pub nome: String,

    /// Current lifecycle status.
    pub status: EventoStatus,

    /// Scheduled start instant.
    pub inicio: DateTime<Utc>,

    /// Scheduled end instant. Must be strictly after `inicio`.
    pub fim: DateTime<Utc>,

    /// Whether the event is excluded from automatic processing.
    pub archived: bool,

    /// Registration timestamp (immutable).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl Evento {
    /// Creates a new event in the given initial status.
    #[must_use]
    pub fn new(
        id: EventoId,
        nome: String,
        status: EventoStatus,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            nome,
            status,
            inicio,
            fim,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lightweight event summary for list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct EventoSummary {
    /// Event identifier.
    pub id: EventoId,
    /// Event name.
    pub nome: String,
    /// Current lifecycle status.
    pub status: EventoStatus,
    /// Scheduled start instant.
    pub inicio: DateTime<Utc>,
    /// Scheduled end instant.
    pub fim: DateTime<Utc>,
    /// Whether the event is archived.
    pub archived: bool,
}

impl From<&Evento> for EventoSummary {
    fn from(evento: &Evento) -> Self {
        Self {
            id: evento.id,
            nome: evento.nome.clone(),
            status: evento.status,
            inicio: evento.inicio,
            fim: evento.fim,
            archived: evento.archived,
        }
    }
}
