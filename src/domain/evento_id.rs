//! Type-safe event identifier.
//!
//! [`EventoId`] is a newtype wrapper around [`uuid::Uuid`] (v4) providing
//! type safety so that event identifiers cannot be confused with other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a rental event.
///
/// Wraps a UUID v4. Generated once at registration time and immutable
/// thereafter. Used as the row key in the `eventos` table, timeline owner
/// reference, and WebSocket subscription target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventoId(uuid::Uuid);

impl EventoId {
    /// Creates a new random `EventoId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `EventoId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for EventoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for EventoId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EventoId> for uuid::Uuid {
    fn from(id: EventoId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EventoId {
    type Err = crate::error::GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<uuid::Uuid>().map(Self).map_err(|_| {
            crate::error::GatewayError::InvalidRequest(format!("malformed evento id: {s}"))
        })
    }
}
