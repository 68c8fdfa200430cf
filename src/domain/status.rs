//! Event lifecycle status.
//!
//! [`EventoStatus`] models the progression of a rental event from
//! confirmation to completion. The automatic transition logic only ever
//! moves an event forward along `confirmado`/`em_preparacao` →
//! `em_execucao` → `concluido`; `cancelado` is reached exclusively through
//! an explicit user action.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Lifecycle status of a rental event.
///
/// Stored in the database as the lowercase snake_case string returned by
/// [`EventoStatus::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventoStatus {
    /// Booking confirmed; the event has not started yet.
    Confirmado,
    /// Items are being prepared or delivered ahead of the start.
    EmPreparacao,
    /// The event is currently running (`inicio <= now < fim`).
    EmExecucao,
    /// The event window has passed; terminal for automatic transitions.
    Concluido,
    /// Cancelled by an explicit user action; terminal.
    Cancelado,
}

impl EventoStatus {
    /// All statuses in expected progression order (`cancelado` last).
    pub const ALL: [Self; 5] = [
        Self::Confirmado,
        Self::EmPreparacao,
        Self::EmExecucao,
        Self::Concluido,
        Self::Cancelado,
    ];

    /// Returns the storage/wire representation of this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmado => "confirmado",
            Self::EmPreparacao => "em_preparacao",
            Self::EmExecucao => "em_execucao",
            Self::Concluido => "concluido",
            Self::Cancelado => "cancelado",
        }
    }

    /// Returns `true` if the event is waiting for its start boundary
    /// (`confirmado` or `em_preparacao`).
    #[must_use]
    pub const fn is_awaiting_start(&self) -> bool {
        matches!(self, Self::Confirmado | Self::EmPreparacao)
    }

    /// Returns `true` if no automatic transition can ever apply again
    /// (`concluido` or `cancelado`).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Concluido | Self::Cancelado)
    }
}

impl fmt::Display for EventoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventoStatus {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmado" => Ok(Self::Confirmado),
            "em_preparacao" => Ok(Self::EmPreparacao),
            "em_execucao" => Ok(Self::EmExecucao),
            "concluido" => Ok(Self::Concluido),
            "cancelado" => Ok(Self::Cancelado),
            other => Err(GatewayError::InvalidStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_str() {
        for status in EventoStatus::ALL {
            let parsed = EventoStatus::from_str(status.as_str());
            assert_eq!(parsed.ok(), Some(status));
        }
    }

    #[test]
    fn unknown_string_is_rejected() {
        assert!(EventoStatus::from_str("finalizado").is_err());
        assert!(EventoStatus::from_str("").is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&EventoStatus::EmPreparacao).unwrap_or_default();
        assert_eq!(json, "\"em_preparacao\"");
    }

    #[test]
    fn terminal_states() {
        assert!(EventoStatus::Concluido.is_terminal());
        assert!(EventoStatus::Cancelado.is_terminal());
        assert!(!EventoStatus::EmExecucao.is_terminal());
    }

    #[test]
    fn awaiting_start_and_execution_are_disjoint() {
        // The two sweep scans filter on these sets; no status may be in both.
        for status in EventoStatus::ALL {
            assert!(!(status.is_awaiting_start() && status == EventoStatus::EmExecucao));
        }
    }

    #[test]
    fn awaiting_start_states() {
        assert!(EventoStatus::Confirmado.is_awaiting_start());
        assert!(EventoStatus::EmPreparacao.is_awaiting_start());
        assert!(!EventoStatus::EmExecucao.is_awaiting_start());
        assert!(!EventoStatus::Concluido.is_awaiting_start());
    }
}
