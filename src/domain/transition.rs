//! Automatic status transition predicate.
//!
//! [`due_transition`] is the single source of truth for when an event's
//! status must change based on wall-clock time. Both automatic paths —
//! the per-view synchronizer and the scheduler-invoked sweep — call this
//! same function, so they can never disagree on the resulting status.
//!
//! The in-progress window is half-open: `inicio <= now < fim`. Exactly
//! one of "not yet started", "in progress", "finished" holds at any
//! instant, with no gap or overlap at the boundaries.

use chrono::{DateTime, Utc};

use super::status::EventoStatus;
use super::timeline::TimelineKind;

/// Which boundary of the scheduled window was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// The start boundary was reached: the event enters execution.
    Start,
    /// The end boundary was reached: the event is complete.
    Complete,
}

/// A due status change computed by [`due_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Boundary that triggered the change.
    pub kind: TransitionKind,
    /// Status the event held when evaluated.
    pub from: EventoStatus,
    /// Status the event must move to.
    pub to: EventoStatus,
}

impl Transition {
    /// Timeline entry kind recorded for this transition.
    #[must_use]
    pub const fn timeline_kind(&self) -> TimelineKind {
        match self.kind {
            TransitionKind::Start => TimelineKind::Execucao,
            TransitionKind::Complete => TimelineKind::Fechamento,
        }
    }

    /// Human-readable timeline description for this transition.
    #[must_use]
    pub const fn descricao(&self) -> &'static str {
        match self.kind {
            TransitionKind::Start => "Execução iniciada automaticamente",
            TransitionKind::Complete => "Evento concluído automaticamente",
        }
    }
}

/// Computes the status transition due for an event at `now`, if any.
///
/// Pure function of the event's current status and scheduled window.
/// Idempotent: once the returned transition is applied, re-evaluating
/// with the same `now` yields `None`, because the new status no longer
/// satisfies the triggering guard.
///
/// A malformed window (`inicio >= fim`) is logged at warn level and
/// treated as "no transition applicable" — it never aborts the caller.
#[must_use]
pub fn due_transition(
    status: EventoStatus,
    inicio: DateTime<Utc>,
    fim: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<Transition> {
    if inicio >= fim {
        tracing::warn!(%inicio, %fim, "janela de evento invalida, transicao ignorada");
        return None;
    }

    if status.is_terminal() {
        return None;
    }

    if status.is_awaiting_start() && inicio <= now && now < fim {
        return Some(Transition {
            kind: TransitionKind::Start,
            from: status,
            to: EventoStatus::EmExecucao,
        });
    }

    if status == EventoStatus::EmExecucao && now >= fim {
        return Some(Transition {
            kind: TransitionKind::Complete,
            from: status,
            to: EventoStatus::Concluido,
        });
    }

    None
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(y, mo, d, h, mi, 0) {
            chrono::LocalResult::Single(t) => t,
            _ => panic!("invalid test timestamp"),
        }
    }

    // 2025-06-01, 18:00 to 23:00
    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (ts(2025, 6, 1, 18, 0), ts(2025, 6, 1, 23, 0))
    }

    #[test]
    fn before_start_no_transition() {
        let (inicio, fim) = window();
        let now = ts(2025, 6, 1, 17, 59);
        assert_eq!(
            due_transition(EventoStatus::Confirmado, inicio, fim, now),
            None
        );
    }

    #[test]
    fn start_boundary_is_inclusive() {
        let (inicio, fim) = window();
        let t = due_transition(EventoStatus::Confirmado, inicio, fim, inicio);
        let Some(t) = t else {
            panic!("expected start transition at now == inicio");
        };
        assert_eq!(t.kind, TransitionKind::Start);
        assert_eq!(t.to, EventoStatus::EmExecucao);

        // One tick earlier: nothing.
        let just_before = inicio - chrono::Duration::seconds(1);
        assert_eq!(
            due_transition(EventoStatus::Confirmado, inicio, fim, just_before),
            None
        );
    }

    #[test]
    fn em_preparacao_also_starts() {
        let (inicio, fim) = window();
        let now = ts(2025, 6, 1, 19, 0);
        let t = due_transition(EventoStatus::EmPreparacao, inicio, fim, now);
        assert_eq!(t.map(|t| t.to), Some(EventoStatus::EmExecucao));
    }

    #[test]
    fn end_boundary_is_exclusive_for_execution() {
        let (inicio, fim) = window();
        // At now == fim the event counts as already finished.
        let t = due_transition(EventoStatus::EmExecucao, inicio, fim, fim);
        let Some(t) = t else {
            panic!("expected completion at now == fim");
        };
        assert_eq!(t.kind, TransitionKind::Complete);
        assert_eq!(t.to, EventoStatus::Concluido);

        // Start rule must not fire at the end instant either.
        assert_eq!(
            due_transition(EventoStatus::Confirmado, inicio, fim, fim),
            None
        );
    }

    #[test]
    fn idempotent_after_start() {
        let (inicio, fim) = window();
        let now = ts(2025, 6, 1, 18, 0);
        let first = due_transition(EventoStatus::Confirmado, inicio, fim, now);
        let Some(first) = first else {
            panic!("expected transition");
        };
        // Re-evaluating with the applied status and the same `now` is a no-op.
        assert_eq!(due_transition(first.to, inicio, fim, now), None);
    }

    #[test]
    fn idempotent_after_completion() {
        let (inicio, fim) = window();
        let now = ts(2025, 6, 1, 23, 0);
        let first = due_transition(EventoStatus::EmExecucao, inicio, fim, now);
        let Some(first) = first else {
            panic!("expected transition");
        };
        assert_eq!(due_transition(first.to, inicio, fim, now), None);
    }

    #[test]
    fn terminal_states_never_transition() {
        let (inicio, fim) = window();
        let long_after = ts(2025, 6, 2, 9, 0);
        for status in [EventoStatus::Concluido, EventoStatus::Cancelado] {
            assert_eq!(due_transition(status, inicio, fim, long_after), None);
        }
    }

    #[test]
    fn invalid_window_is_a_no_op() {
        let inicio = ts(2025, 6, 1, 23, 0);
        let fim = ts(2025, 6, 1, 18, 0); // inverted
        let now = ts(2025, 6, 1, 20, 0);
        assert_eq!(
            due_transition(EventoStatus::Confirmado, inicio, fim, now),
            None
        );
        // Degenerate zero-length window as well.
        assert_eq!(
            due_transition(EventoStatus::Confirmado, inicio, inicio, now),
            None
        );
    }

    #[test]
    fn stale_confirmado_past_window_stays_put() {
        // Whole window already passed while still confirmado: the start
        // rule no longer matches (now >= fim), so nothing fires. The two
        // sweep scans stay disjoint.
        let (inicio, fim) = window();
        let next_day = ts(2025, 6, 2, 9, 0);
        assert_eq!(
            due_transition(EventoStatus::Confirmado, inicio, fim, next_day),
            None
        );
    }

    #[test]
    fn full_lifecycle_walkthrough() {
        let (inicio, fim) = window();

        // 17:59 — confirmado, nothing due.
        let mut status = EventoStatus::Confirmado;
        assert_eq!(
            due_transition(status, inicio, fim, ts(2025, 6, 1, 17, 59)),
            None
        );

        // 18:00 — starts.
        let t = due_transition(status, inicio, fim, ts(2025, 6, 1, 18, 0));
        let Some(t) = t else {
            panic!("expected start");
        };
        assert_eq!(t.timeline_kind(), TimelineKind::Execucao);
        status = t.to;

        // 23:00 — completes.
        let t = due_transition(status, inicio, fim, ts(2025, 6, 1, 23, 0));
        let Some(t) = t else {
            panic!("expected completion");
        };
        assert_eq!(t.timeline_kind(), TimelineKind::Fechamento);
        status = t.to;

        // Next morning — no further change possible.
        assert_eq!(
            due_transition(status, inicio, fim, ts(2025, 6, 2, 9, 0)),
            None
        );
    }
}
