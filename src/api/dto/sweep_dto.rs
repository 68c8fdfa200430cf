//! Sweep endpoint DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::service::SweepSummary;

/// Response body for `POST /sweep`.
///
/// Informational summary of one sweep invocation; not a contract callers
/// should branch on.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SweepResponse {
    /// Events moved to `em_execucao`.
    pub eventos_iniciados: u64,
    /// Events moved to `concluido`.
    pub eventos_concluidos: u64,
    /// Wall-clock instant the sweep evaluated against (RFC 3339).
    pub timestamp: DateTime<Utc>,
}

impl From<SweepSummary> for SweepResponse {
    fn from(summary: SweepSummary) -> Self {
        Self {
            eventos_iniciados: summary.eventos_iniciados,
            eventos_concluidos: summary.eventos_concluidos,
            timestamp: summary.timestamp,
        }
    }
}
