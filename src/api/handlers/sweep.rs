//! Sweep endpoint: scheduler-invoked bulk status correction.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::SweepResponse;
use crate::app_state::AppState;

/// `POST /sweep` — Run one status sweep over all active events.
///
/// Parameter-less entry point for an external cron-like scheduler; the
/// trigger cadence is deployment configuration. Safe to invoke
/// repeatedly and concurrently: the transition predicate becomes false
/// once applied, so repeated invocations converge. Per-event failures
/// are logged and skipped; this endpoint always returns 200 with a
/// summary.
#[utoipa::path(
    post,
    path = "/api/v1/sweep",
    tag = "Sweep",
    summary = "Run a status sweep",
    description = "Scans active events past their start or end boundary and applies due status transitions with actor `sweep`. Returns how many events were started and completed.",
    responses(
        (status = 200, description = "Sweep summary", body = SweepResponse),
    )
)]
pub async fn run_sweep(State(state): State<AppState>) -> impl IntoResponse {
    let summary = state.evento_service.run_sweep().await;
    Json(SweepResponse::from(summary))
}

/// Sweep routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sweep", post(run_sweep))
}
