//! Event service: orchestrates event operations and emits notifications.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    Actor, DomainEvent, EventBus, Evento, EventoId, EventoStatus, EventoSummary, TimelineEntry,
    TimelineKind, Transition, due_transition,
};
use crate::error::GatewayError;
use crate::persistence::EventoStore;

/// Result summary of one sweep invocation.
///
/// Informational only — consumers must not branch on it.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    /// Events moved to `em_execucao` in this invocation.
    pub eventos_iniciados: u64,
    /// Events moved to `concluido` in this invocation.
    pub eventos_concluidos: u64,
    /// Wall-clock instant the sweep evaluated against.
    pub timestamp: DateTime<Utc>,
}

/// Orchestration layer for all event operations.
///
/// Stateless coordinator: owns the [`EventoStore`] for persistence and
/// the [`EventBus`] for notifications. Every mutation follows the
/// pattern: write to the store → append timeline → publish notification.
/// The status row in Postgres is the single source of truth; the service
/// keeps no copy of it.
#[derive(Debug, Clone)]
pub struct EventoService {
    store: EventoStore,
    event_bus: EventBus,
}

impl EventoService {
    /// Creates a new `EventoService`.
    #[must_use]
    pub fn new(store: EventoStore, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns `true` when the backing store answers a ping.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    /// Registers a new event.
    ///
    /// The scheduled window must be well-formed (`inicio < fim`); a
    /// `criacao` timeline entry is recorded for the registering user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidSchedule`] on a malformed window or
    /// a [`GatewayError::PersistenceError`] on database failure.
    pub async fn create_evento(
        &self,
        nome: String,
        status: EventoStatus,
        inicio: DateTime<Utc>,
        fim: DateTime<Utc>,
        usuario: String,
    ) -> Result<Evento, GatewayError> {
        if inicio >= fim {
            return Err(GatewayError::InvalidSchedule(format!(
                "fim ({fim}) must be after inicio ({inicio})"
            )));
        }

        let evento = Evento::new(EventoId::new(), nome, status, inicio, fim);
        self.store.insert_evento(&evento).await?;

        let actor = Actor::User(usuario);
        self.append_timeline_best_effort(
            evento.id,
            TimelineKind::Criacao,
            "Evento registrado",
            &actor,
        )
        .await;

        let _ = self.event_bus.publish(DomainEvent::EventoCreated {
            evento_id: evento.id,
            nome: evento.nome.clone(),
            status: evento.status,
            timestamp: evento.created_at,
        });

        tracing::info!(evento_id = %evento.id, status = %evento.status, "evento created");
        Ok(evento)
    }

    /// Fetches a single event by ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventoNotFound`] if the event does not exist.
    pub async fn get_evento(&self, id: EventoId) -> Result<Evento, GatewayError> {
        self.store.fetch(id).await
    }

    /// Lists event summaries plus the total count for pagination.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn list_eventos(
        &self,
        status: Option<EventoStatus>,
        archived: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<EventoSummary>, u64), GatewayError> {
        let eventos = self.store.list(status, archived, limit, offset).await?;
        let total = self.store.count(status, archived).await?;
        let summaries = eventos.iter().map(EventoSummary::from).collect();
        Ok((summaries, total))
    }

    /// Returns an event's timeline in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventoNotFound`] if the event does not exist.
    pub async fn timeline(&self, id: EventoId) -> Result<Vec<TimelineEntry>, GatewayError> {
        // Fetch first so a missing event maps to 404 rather than an empty list.
        let _ = self.store.fetch(id).await?;
        self.store.timeline_for(id).await
    }

    /// Archives an event, excluding it from all automatic processing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventoNotFound`] if the event does not exist.
    pub async fn archive_evento(&self, id: EventoId, usuario: String) -> Result<(), GatewayError> {
        let _ = self.store.fetch(id).await?;
        let archived = self.store.set_archived(id).await?;
        if !archived {
            // Already archived: idempotent no-op.
            return Ok(());
        }

        let actor = Actor::User(usuario);
        self.append_timeline_best_effort(id, TimelineKind::Arquivamento, "Evento arquivado", &actor)
            .await;

        let _ = self.event_bus.publish(DomainEvent::EventoArchived {
            evento_id: id,
            timestamp: Utc::now(),
        });

        tracing::info!(evento_id = %id, "evento archived");
        Ok(())
    }

    /// Opportunistic per-view status correction (the client synchronizer).
    ///
    /// Evaluates the shared transition predicate against the loaded
    /// snapshot and, when a transition is due, persists it with actor
    /// [`Actor::ClientSync`]. Best-effort: every failure is logged and
    /// swallowed, and the caller gets the stale snapshot back — this path
    /// must never surface an error to the viewer or block the response.
    ///
    /// Callers must only invoke this with an authenticated actor context;
    /// archived events are returned untouched.
    pub async fn sync_status(&self, evento: Evento) -> Evento {
        if evento.archived {
            return evento;
        }

        let now = Utc::now();
        let Some(transition) = due_transition(evento.status, evento.inicio, evento.fim, now) else {
            return evento;
        };

        let applied = self
            .apply_transition(&evento, transition, Actor::ClientSync)
            .await;
        match applied {
            Ok(true) => Evento {
                status: transition.to,
                updated_at: now,
                ..evento
            },
            Ok(false) => evento,
            Err(e) => {
                tracing::warn!(evento_id = %evento.id, error = %e, "status sync failed");
                evento
            }
        }
    }

    /// Scheduler-invoked bulk status correction (the sweep).
    ///
    /// Scans the two disjoint due sets and applies the shared transition
    /// predicate to each matched event with actor
    /// [`Actor::AutomatedSweep`]. Per-event failures are logged and
    /// skipped; the batch always runs to completion and the summary is
    /// returned even when individual events failed — the predicate stays
    /// true for them, so the next invocation retries naturally.
    pub async fn run_sweep(&self) -> SweepSummary {
        let now = Utc::now();
        let eventos_iniciados = self.sweep_scan(self.store.due_to_start(now).await, now).await;
        let eventos_concluidos = self
            .sweep_scan(self.store.due_to_complete(now).await, now)
            .await;

        tracing::info!(eventos_iniciados, eventos_concluidos, "sweep finished");
        SweepSummary {
            eventos_iniciados,
            eventos_concluidos,
            timestamp: now,
        }
    }

    /// Applies due transitions to one scan's result set, returning how
    /// many were applied. A failed scan is logged and counts zero; the
    /// next invocation picks the set up again.
    async fn sweep_scan(
        &self,
        scan: Result<Vec<Evento>, GatewayError>,
        now: DateTime<Utc>,
    ) -> u64 {
        let eventos = match scan {
            Ok(eventos) => eventos,
            Err(e) => {
                tracing::error!(error = %e, "sweep scan failed, skipping this cycle");
                return 0;
            }
        };

        let mut applied = 0u64;
        for evento in eventos {
            let Some(transition) = due_transition(evento.status, evento.inicio, evento.fim, now)
            else {
                continue;
            };
            match self
                .apply_transition(&evento, transition, Actor::AutomatedSweep)
                .await
            {
                Ok(true) => applied = applied.saturating_add(1),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(evento_id = %evento.id, error = %e, "sweep transition failed, event skipped");
                }
            }
        }
        applied
    }

    /// Persists one status transition: guarded status update, timeline
    /// append, notification. Returns `Ok(false)` when another writer won
    /// the race and the transition was skipped entirely.
    ///
    /// The timeline append runs after the status write and is not rolled
    /// back on failure; the resulting gap is logged as a known
    /// inconsistency window.
    async fn apply_transition(
        &self,
        evento: &Evento,
        transition: Transition,
        actor: Actor,
    ) -> Result<bool, GatewayError> {
        let updated = self
            .store
            .update_status(evento.id, transition.from, transition.to)
            .await?;
        if !updated {
            tracing::debug!(
                evento_id = %evento.id,
                expected = %transition.from,
                "status changed concurrently, transition skipped"
            );
            return Ok(false);
        }

        if let Err(e) = self
            .store
            .append_timeline(
                evento.id,
                transition.timeline_kind(),
                transition.descricao(),
                &actor,
            )
            .await
        {
            tracing::error!(
                evento_id = %evento.id,
                error = %e,
                "timeline append failed after status update; audit entry missing"
            );
        }

        let _ = self.event_bus.publish(DomainEvent::StatusChanged {
            evento_id: evento.id,
            from: transition.from,
            to: transition.to,
            actor,
            timestamp: Utc::now(),
        });

        tracing::info!(
            evento_id = %evento.id,
            from = %transition.from,
            to = %transition.to,
            "status transitioned"
        );
        Ok(true)
    }

    /// Timeline append for non-transition entries; failures are logged,
    /// never propagated.
    async fn append_timeline_best_effort(
        &self,
        evento_id: EventoId,
        kind: TimelineKind,
        descricao: &str,
        actor: &Actor,
    ) {
        if let Err(e) = self
            .store
            .append_timeline(evento_id, kind, descricao, actor)
            .await
        {
            tracing::error!(evento_id = %evento_id, error = %e, "timeline append failed");
        }
    }
}
