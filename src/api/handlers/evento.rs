//! Event handlers: create, list, get (with sync-on-read), archive, timeline.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateEventoRequest, EventoFilterParams, EventoListResponse, EventoResponse, EventoSummaryDto,
    PaginationMeta, PaginationParams, TimelineEntryDto, TimelineResponse,
};
use crate::app_state::AppState;
use crate::domain::{EventoId, EventoStatus};
use crate::error::{ErrorResponse, GatewayError};

/// Name of the header carrying the authenticated actor identity.
const USUARIO_HEADER: &str = "x-usuario";

/// Extracts the authenticated actor name, if any.
fn usuario_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USUARIO_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// `POST /eventos` — Register a new event.
///
/// # Errors
///
/// Returns [`GatewayError`] on a malformed scheduled window.
#[utoipa::path(
    post,
    path = "/api/v1/eventos",
    tag = "Eventos",
    summary = "Register a new event",
    description = "Registers an event with its scheduled window. The window must satisfy `inicio < fim`; a `criacao` timeline entry is recorded for the registering user.",
    request_body = CreateEventoRequest,
    responses(
        (status = 201, description = "Event registered", body = EventoResponse),
        (status = 400, description = "Invalid request or schedule", body = ErrorResponse),
    )
)]
pub async fn create_evento(
    State(state): State<AppState>,
    Json(req): Json<CreateEventoRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    if req.nome.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "nome must not be empty".to_string(),
        ));
    }
    if req.usuario.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "usuario must not be empty".to_string(),
        ));
    }

    let status = req.status.unwrap_or(EventoStatus::Confirmado);
    let evento = state
        .evento_service
        .create_evento(req.nome, status, req.inicio, req.fim, req.usuario)
        .await?;

    Ok((StatusCode::CREATED, Json(EventoResponse::from(&evento))))
}

/// `GET /eventos` — List events with pagination and optional filters.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/eventos",
    tag = "Eventos",
    summary = "List events",
    description = "Returns a paginated list of events, optionally filtered by status and archived flag.",
    params(PaginationParams, EventoFilterParams),
    responses(
        (status = 200, description = "Paginated event list", body = EventoListResponse),
    )
)]
pub async fn list_eventos(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<EventoFilterParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let pagination = pagination.clamped();

    let (summaries, total) = state
        .evento_service
        .list_eventos(
            filter.status,
            filter.archived,
            pagination.limit(),
            pagination.offset(),
        )
        .await?;

    #[allow(clippy::cast_possible_truncation)]
    let total = total as u32;
    let total_pages = if total == 0 {
        0
    } else {
        total.div_ceil(pagination.per_page)
    };

    let data: Vec<EventoSummaryDto> = summaries.into_iter().map(EventoSummaryDto::from).collect();

    Ok(Json(EventoListResponse {
        data,
        pagination: PaginationMeta {
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages,
        },
    }))
}

/// `GET /eventos/{id}` — Get a single event.
///
/// When the request carries an `x-usuario` header, the status
/// synchronizer runs first: if the event's scheduled window says a
/// transition is due, it is applied (actor `client_sync`) and the fresh
/// snapshot is returned. Without the header the record is returned
/// as-is — unauthenticated contexts never write.
///
/// # Errors
///
/// Returns [`GatewayError::EventoNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/eventos/{id}",
    tag = "Eventos",
    summary = "Get event details",
    description = "Returns a single event. With an `x-usuario` header present, stale statuses are corrected opportunistically before responding; sync failures are swallowed and the stale snapshot returned.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        ("x-usuario" = Option<String>, Header, description = "Authenticated actor name; enables the status synchronizer"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventoResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_evento(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let evento_id = EventoId::from_uuid(id);
    let evento = state.evento_service.get_evento(evento_id).await?;

    let evento = if usuario_from_headers(&headers).is_some() {
        state.evento_service.sync_status(evento).await
    } else {
        evento
    };

    Ok(Json(EventoResponse::from(&evento)))
}

/// `POST /eventos/{id}/archive` — Archive an event.
///
/// # Errors
///
/// Returns [`GatewayError::EventoNotFound`] if the event does not exist,
/// or [`GatewayError::InvalidRequest`] without an `x-usuario` header.
#[utoipa::path(
    post,
    path = "/api/v1/eventos/{id}/archive",
    tag = "Eventos",
    summary = "Archive an event",
    description = "Marks the event archived, excluding it from the sweep and the synchronizer. Requires an `x-usuario` header; idempotent.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
        ("x-usuario" = String, Header, description = "Authenticated actor name"),
    ),
    responses(
        (status = 204, description = "Event archived"),
        (status = 400, description = "Missing actor header", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn archive_evento(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let usuario = usuario_from_headers(&headers).ok_or_else(|| {
        GatewayError::InvalidRequest(format!("{USUARIO_HEADER} header required"))
    })?;

    let evento_id = EventoId::from_uuid(id);
    state
        .evento_service
        .archive_evento(evento_id, usuario)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /eventos/{id}/timeline` — Get an event's audit trail.
///
/// # Errors
///
/// Returns [`GatewayError::EventoNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/eventos/{id}/timeline",
    tag = "Eventos",
    summary = "Get event timeline",
    description = "Returns the append-only timeline for the event in insertion order.",
    params(
        ("id" = uuid::Uuid, Path, description = "Event UUID"),
    ),
    responses(
        (status = 200, description = "Timeline entries", body = TimelineResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_timeline(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let evento_id = EventoId::from_uuid(id);
    let entries = state.evento_service.timeline(evento_id).await?;

    Ok(Json(TimelineResponse {
        evento_id,
        entries: entries.into_iter().map(TimelineEntryDto::from).collect(),
    }))
}

/// Event management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/eventos", post(create_evento).get(list_eventos))
        .route("/eventos/{id}", get(get_evento))
        .route("/eventos/{id}/archive", post(archive_evento))
        .route("/eventos/{id}/timeline", get(get_timeline))
}
