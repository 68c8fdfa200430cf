//! Append-only event timeline (audit trail).
//!
//! Every mutation of an event — automatic or user-driven — is recorded as
//! a [`TimelineEntry`] owned by exactly one event. Entries are never
//! updated or reassigned. The [`Actor`] enum distinguishes machine-driven
//! history from human actions by construction rather than by comparing
//! magic strings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evento_id::EventoId;
use crate::error::GatewayError;

/// Category of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// Event registered.
    Criacao,
    /// Execution started (start boundary crossed).
    Execucao,
    /// Event closed out (end boundary crossed).
    Fechamento,
    /// Event archived, excluding it from automatic processing.
    Arquivamento,
}

impl TimelineKind {
    /// Storage representation of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Criacao => "criacao",
            Self::Execucao => "execucao",
            Self::Fechamento => "fechamento",
            Self::Arquivamento => "arquivamento",
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimelineKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "criacao" => Ok(Self::Criacao),
            "execucao" => Ok(Self::Execucao),
            "fechamento" => Ok(Self::Fechamento),
            "arquivamento" => Ok(Self::Arquivamento),
            other => Err(GatewayError::InvalidRequest(format!(
                "unknown timeline kind: {other}"
            ))),
        }
    }
}

/// Who performed the action recorded by a timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Actor {
    /// A named human user.
    User(String),
    /// The scheduler-invoked status sweep.
    #[serde(rename = "sweep")]
    AutomatedSweep,
    /// The per-view status synchronizer.
    ClientSync,
}

impl Actor {
    /// Storage discriminant for this actor kind.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::User(_) => "user",
            Self::AutomatedSweep => "sweep",
            Self::ClientSync => "client_sync",
        }
    }

    /// Display name stored alongside the discriminant; `None` for
    /// machine actors.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::User(name) => Some(name),
            Self::AutomatedSweep | Self::ClientSync => None,
        }
    }

    /// Reconstructs an actor from its stored `(kind, name)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] on an unknown kind or a
    /// `user` row without a name.
    pub fn from_parts(kind: &str, name: Option<&str>) -> Result<Self, GatewayError> {
        match kind {
            "user" => name
                .map(|n| Self::User(n.to_string()))
                .ok_or_else(|| GatewayError::InvalidRequest("user actor without name".to_string())),
            "sweep" => Ok(Self::AutomatedSweep),
            "client_sync" => Ok(Self::ClientSync),
            other => Err(GatewayError::InvalidRequest(format!(
                "unknown actor kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(name) => write!(f, "{name}"),
            Self::AutomatedSweep => f.write_str("sweep"),
            Self::ClientSync => f.write_str("client_sync"),
        }
    }
}

/// A single entry in an event's timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    /// Insertion-ordered row ID.
    pub id: i64,
    /// Owning event.
    pub evento_id: EventoId,
    /// Entry category.
    pub kind: TimelineKind,
    /// Human-readable description of what happened.
    pub descricao: String,
    /// Who performed the action.
    pub actor: Actor,
    /// When the entry was recorded.
    pub registrado_em: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_round_trip() {
        for kind in [
            TimelineKind::Criacao,
            TimelineKind::Execucao,
            TimelineKind::Fechamento,
            TimelineKind::Arquivamento,
        ] {
            assert_eq!(TimelineKind::from_str(kind.as_str()).ok(), Some(kind));
        }
    }

    #[test]
    fn actor_parts_round_trip() {
        let actors = [
            Actor::User("Maria Souza".to_string()),
            Actor::AutomatedSweep,
            Actor::ClientSync,
        ];
        for actor in actors {
            let rebuilt = Actor::from_parts(actor.kind_str(), actor.name());
            assert_eq!(rebuilt.ok(), Some(actor));
        }
    }

    #[test]
    fn user_without_name_is_rejected() {
        assert!(Actor::from_parts("user", None).is_err());
    }

    #[test]
    fn unknown_actor_kind_is_rejected() {
        // The legacy free-text sentinel must not round-trip as an actor kind.
        assert!(Actor::from_parts("Sistema (Automático)", None).is_err());
    }

    #[test]
    fn machine_actors_have_no_name() {
        assert_eq!(Actor::AutomatedSweep.name(), None);
        assert_eq!(Actor::ClientSync.name(), None);
        assert_eq!(Actor::User("Ana".to_string()).name(), Some("Ana"));
    }
}
