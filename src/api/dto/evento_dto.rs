//! Event-related DTOs for create, get, list, and timeline operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common_dto::PaginationMeta;
use crate::domain::{Evento, EventoId, EventoStatus, EventoSummary, TimelineEntry};

/// Request body for `POST /eventos`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateEventoRequest {
    /// Human-readable event name.
    pub nome: String,
    /// Initial lifecycle status. Defaults to `confirmado`.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "confirmado")]
    pub status: Option<EventoStatus>,
    /// Scheduled start instant (RFC 3339).
    pub inicio: DateTime<Utc>,
    /// Scheduled end instant (RFC 3339); must be after `inicio`.
    pub fim: DateTime<Utc>,
    /// Name of the registering user, recorded in the timeline.
    pub usuario: String,
}

/// Full event representation for single-record responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EventoResponse {
    /// Event identifier.
    #[schema(value_type = uuid::Uuid)]
    pub id: EventoId,
    /// Event name.
    pub nome: String,
    /// Current lifecycle status.
    #[schema(value_type = String, example = "em_execucao")]
    pub status: EventoStatus,
    /// Scheduled start instant.
    pub inicio: DateTime<Utc>,
    /// Scheduled end instant.
    pub fim: DateTime<Utc>,
    /// Whether the event is archived.
    pub archived: bool,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Evento> for EventoResponse {
    fn from(evento: &Evento) -> Self {
        Self {
            id: evento.id,
            nome: evento.nome.clone(),
            status: evento.status,
            inicio: evento.inicio,
            fim: evento.fim,
            archived: evento.archived,
            created_at: evento.created_at,
            updated_at: evento.updated_at,
        }
    }
}

/// Event summary for list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EventoSummaryDto {
    /// Event identifier.
    #[schema(value_type = uuid::Uuid)]
    pub id: EventoId,
    /// Event name.
    pub nome: String,
    /// Current lifecycle status.
    #[schema(value_type = String, example = "confirmado")]
    pub status: EventoStatus,
    /// Scheduled start instant.
    pub inicio: DateTime<Utc>,
    /// Scheduled end instant.
    pub fim: DateTime<Utc>,
    /// Whether the event is archived.
    pub archived: bool,
}

impl From<EventoSummary> for EventoSummaryDto {
    fn from(s: EventoSummary) -> Self {
        Self {
            id: s.id,
            nome: s.nome,
            status: s.status,
            inicio: s.inicio,
            fim: s.fim,
            archived: s.archived,
        }
    }
}

/// Paginated list response for `GET /eventos`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct EventoListResponse {
    /// Event summaries.
    pub data: Vec<EventoSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Filter query parameters for `GET /eventos`.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct EventoFilterParams {
    /// Restrict to a single lifecycle status.
    #[serde(default)]
    #[param(value_type = Option<String>, example = "em_execucao")]
    pub status: Option<EventoStatus>,
    /// Restrict by archived flag.
    #[serde(default)]
    pub archived: Option<bool>,
}

/// One timeline entry in API form.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TimelineEntryDto {
    /// Insertion-ordered entry ID.
    pub id: i64,
    /// Entry kind discriminant.
    pub kind: String,
    /// Human-readable description.
    pub descricao: String,
    /// Actor kind discriminant (`user` / `sweep` / `client_sync`).
    pub actor_kind: String,
    /// Actor display name; absent for machine actors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_name: Option<String>,
    /// When the entry was recorded.
    pub registrado_em: DateTime<Utc>,
}

impl From<TimelineEntry> for TimelineEntryDto {
    fn from(entry: TimelineEntry) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind.as_str().to_string(),
            descricao: entry.descricao,
            actor_kind: entry.actor.kind_str().to_string(),
            actor_name: entry.actor.name().map(ToString::to_string),
            registrado_em: entry.registrado_em,
        }
    }
}

/// Timeline response for `GET /eventos/{id}/timeline`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TimelineResponse {
    /// Owning event identifier.
    #[schema(value_type = uuid::Uuid)]
    pub evento_id: EventoId,
    /// Entries in insertion order.
    pub entries: Vec<TimelineEntryDto>,
}
