//! PostgreSQL implementation of the event store.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{EventoRow, TimelineRow};
use crate::domain::{Actor, Evento, EventoId, EventoStatus, TimelineEntry, TimelineKind};
use crate::error::GatewayError;

/// PostgreSQL-backed event store using `sqlx::PgPool`.
///
/// The `eventos` row is the single source of truth for an event's status;
/// there is no in-memory copy to keep coherent. All writes are
/// last-write-wins, with the status update guarded by the expected
/// current status so a lost race affects zero rows.
#[derive(Debug, Clone)]
pub struct EventoStore {
    pool: PgPool,
}

impl EventoStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trips a trivial query to verify database connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] when the database is
    /// unreachable.
    pub async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        Ok(())
    }

    /// Inserts a newly registered event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn insert_evento(&self, evento: &Evento) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO eventos (id, nome, status, inicio, fim, archived, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(evento.id.as_uuid())
        .bind(&evento.nome)
        .bind(evento.status.as_str())
        .bind(evento.inicio)
        .bind(evento.fim)
        .bind(evento.archived)
        .bind(evento.created_at)
        .bind(evento.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    /// Fetches a single event by ID.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EventoNotFound`] if no row exists, or
    /// [`GatewayError::PersistenceError`] on database failure.
    pub async fn fetch(&self, id: EventoId) -> Result<Evento, GatewayError> {
        let row = sqlx::query_as::<_, EventoRow>(
            "SELECT id, nome, status, inicio, fim, archived, created_at, updated_at \
             FROM eventos WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?
        .ok_or(GatewayError::EventoNotFound(*id.as_uuid()))?;

        Evento::try_from(row)
    }

    /// Lists events with optional status and archived filters, newest
    /// start first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn list(
        &self,
        status: Option<EventoStatus>,
        archived: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Evento>, GatewayError> {
        let rows = sqlx::query_as::<_, EventoRow>(
            "SELECT id, nome, status, inicio, fim, archived, created_at, updated_at \
             FROM eventos \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::boolean IS NULL OR archived = $2) \
             ORDER BY inicio DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(status.map(|s| s.as_str()))
        .bind(archived)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(Evento::try_from).collect()
    }

    /// Counts events matching the same filters as [`EventoStore::list`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn count(
        &self,
        status: Option<EventoStatus>,
        archived: Option<bool>,
    ) -> Result<u64, GatewayError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM eventos \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::boolean IS NULL OR archived = $2)",
        )
        .bind(status.map(|s| s.as_str()))
        .bind(archived)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(count.unsigned_abs())
    }

    /// Updates an event's status, guarded by the expected current status.
    ///
    /// Returns `false` when zero rows were affected — another writer
    /// changed the status first and this transition must be skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn update_status(
        &self,
        id: EventoId,
        expected: EventoStatus,
        new: EventoStatus,
    ) -> Result<bool, GatewayError> {
        let result = sqlx::query(
            "UPDATE eventos SET status = $1, updated_at = now() \
             WHERE id = $2 AND status = $3 AND NOT archived",
        )
        .bind(new.as_str())
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    /// Marks an event archived, excluding it from automatic processing.
    ///
    /// Returns `false` if the event was already archived or missing.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn set_archived(&self, id: EventoId) -> Result<bool, GatewayError> {
        let result = sqlx::query(
            "UPDATE eventos SET archived = TRUE, updated_at = now() \
             WHERE id = $1 AND NOT archived",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }

    /// Appends an entry to an event's timeline.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn append_timeline(
        &self,
        evento_id: EventoId,
        kind: TimelineKind,
        descricao: &str,
        actor: &Actor,
    ) -> Result<i64, GatewayError> {
        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO evento_timeline (evento_id, kind, descricao, actor_kind, actor_name) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(evento_id.as_uuid())
        .bind(kind.as_str())
        .bind(descricao)
        .bind(actor.kind_str())
        .bind(actor.name())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Returns an event's timeline in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn timeline_for(&self, evento_id: EventoId) -> Result<Vec<TimelineEntry>, GatewayError> {
        let rows = sqlx::query_as::<_, TimelineRow>(
            "SELECT id, evento_id, kind, descricao, actor_kind, actor_name, registrado_em \
             FROM evento_timeline WHERE evento_id = $1 ORDER BY id ASC",
        )
        .bind(evento_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(TimelineEntry::try_from).collect()
    }

    /// Sweep scan 1: non-archived events awaiting their start whose
    /// window contains `now`.
    ///
    /// The status filter is disjoint from [`EventoStore::due_to_complete`],
    /// so no event can match both scans in one invocation. The transition
    /// predicate re-checks each row before any write.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn due_to_start(&self, now: DateTime<Utc>) -> Result<Vec<Evento>, GatewayError> {
        let rows = sqlx::query_as::<_, EventoRow>(
            "SELECT id, nome, status, inicio, fim, archived, created_at, updated_at \
             FROM eventos \
             WHERE status IN ('confirmado', 'em_preparacao') \
               AND NOT archived \
               AND inicio <= $1 AND fim > $1 \
             ORDER BY inicio ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(Evento::try_from).collect()
    }

    /// Sweep scan 2: non-archived events in execution whose end has passed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    pub async fn due_to_complete(&self, now: DateTime<Utc>) -> Result<Vec<Evento>, GatewayError> {
        let rows = sqlx::query_as::<_, EventoRow>(
            "SELECT id, nome, status, inicio, fim, archived, created_at, updated_at \
             FROM eventos \
             WHERE status = 'em_execucao' \
               AND NOT archived \
               AND fim <= $1 \
             ORDER BY fim ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(Evento::try_from).collect()
    }
}
