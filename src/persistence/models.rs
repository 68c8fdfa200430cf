//! Database row models for events and timeline entries.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{Actor, Evento, EventoId, EventoStatus, TimelineEntry, TimelineKind};
use crate::error::GatewayError;

/// A row from the `eventos` table.
#[derive(Debug, Clone, FromRow)]
pub struct EventoRow {
    /// Event UUID.
    pub id: Uuid,
    /// Event name.
    pub nome: String,
    /// Lifecycle status discriminant string.
    pub status: String,
    /// Scheduled start instant.
    pub inicio: DateTime<Utc>,
    /// Scheduled end instant.
    pub fim: DateTime<Utc>,
    /// Whether the event is excluded from automatic processing.
    pub archived: bool,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventoRow> for Evento {
    type Error = GatewayError;

    fn try_from(row: EventoRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventoId::from_uuid(row.id),
            nome: row.nome,
            status: EventoStatus::from_str(&row.status)?,
            inicio: row.inicio,
            fim: row.fim,
            archived: row.archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `evento_timeline` table.
#[derive(Debug, Clone, FromRow)]
pub struct TimelineRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Owning event UUID.
    pub evento_id: Uuid,
    /// Entry kind discriminant string.
    pub kind: String,
    /// Human-readable description.
    pub descricao: String,
    /// Actor kind discriminant (`user` / `sweep` / `client_sync`).
    pub actor_kind: String,
    /// Actor display name; NULL for machine actors.
    pub actor_name: Option<String>,
    /// Server-side creation timestamp.
    pub registrado_em: DateTime<Utc>,
}

impl TryFrom<TimelineRow> for TimelineEntry {
    type Error = GatewayError;

    fn try_from(row: TimelineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            evento_id: EventoId::from_uuid(row.evento_id),
            kind: TimelineKind::from_str(&row.kind)?,
            descricao: row.descricao,
            actor: Actor::from_parts(&row.actor_kind, row.actor_name.as_deref())?,
            registrado_em: row.registrado_em,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_row(status: &str) -> EventoRow {
        let now = Utc::now();
        EventoRow {
            id: Uuid::new_v4(),
            nome: "Aniversário 15 anos".to_string(),
            status: status.to_string(),
            inicio: now,
            fim: now + chrono::Duration::hours(5),
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn evento_row_converts() {
        let row = make_row("em_preparacao");
        let evento = Evento::try_from(row);
        assert_eq!(evento.ok().map(|e| e.status), Some(EventoStatus::EmPreparacao));
    }

    #[test]
    fn evento_row_rejects_unknown_status() {
        let row = make_row("finalizado");
        assert!(Evento::try_from(row).is_err());
    }

    #[test]
    fn timeline_row_converts_machine_actor() {
        let row = TimelineRow {
            id: 7,
            evento_id: Uuid::new_v4(),
            kind: "execucao".to_string(),
            descricao: "Execução iniciada automaticamente".to_string(),
            actor_kind: "sweep".to_string(),
            actor_name: None,
            registrado_em: Utc::now(),
        };
        let entry = TimelineEntry::try_from(row);
        assert_eq!(entry.ok().map(|e| e.actor), Some(Actor::AutomatedSweep));
    }
}
