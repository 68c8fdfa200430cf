//! Persistence layer: PostgreSQL event store and timeline log.
//!
//! [`postgres::EventoStore`] owns all SQL for the `eventos` and
//! `evento_timeline` tables. The concrete implementation uses
//! `sqlx::PgPool` for async PostgreSQL access; schema lives under
//! `migrations/`.

pub mod models;
pub mod postgres;

pub use postgres::EventoStore;
