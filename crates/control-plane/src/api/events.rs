// Events API routes
// Decision: Reading events is public; writes require a bearer token
// Decision: Only the organizer may update or delete an event

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use sparkbytes_core::Event;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::common::{ApiJson, ErrorResponse, ListResponse};
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::{EventService, ServiceError};

/// Request body for creating or replacing an event
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EventRequest {
    #[serde(default)]
    #[schema(example = "Leftover pizza from the hackathon")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(example = "CDS 1101")]
    pub location: Option<String>,
    /// Calendar date, YYYY-MM-DD
    #[serde(default)]
    #[schema(example = "2025-04-18")]
    pub date: Option<String>,
    /// Time of day, HH:MM or HH:MM:SS
    #[serde(default)]
    #[schema(example = "18:30")]
    pub time: Option<String>,
    #[serde(default)]
    pub food_details: Option<String>,
}

/// App state for events routes
#[derive(Clone)]
pub struct EventsState {
    pub service: Arc<EventService>,
    pub auth: AuthState,
}

impl FromRef<EventsState> for AuthState {
    fn from_ref(input: &EventsState) -> Self {
        input.auth.clone()
    }
}

/// Create events routes
pub fn routes(state: EventsState) -> Router {
    Router::new()
        .route("/events", get(list_events))
        .route("/create-event", post(create_event))
        .route("/events/:event_id", put(update_event).delete(delete_event))
        .with_state(state)
}

/// GET /events - List all events
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "List of events", body = ListResponse<Event>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<EventsState>,
) -> Result<Json<ListResponse<Event>>, ServiceError> {
    let events = state.service.list().await?;
    Ok(Json(ListResponse::new(events)))
}

/// POST /create-event - Create an event organized by the caller
#[utoipa::path(
    post,
    path = "/create-event",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Event already exists", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<EventsState>,
    AuthUser(user): AuthUser,
    WithRejection(Json(req), _): ApiJson<EventRequest>,
) -> Result<(StatusCode, Json<Event>), ServiceError> {
    let event = state.service.create(&user, req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /events/{event_id} - Replace an event
#[utoipa::path(
    put,
    path = "/events/{event_id}",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Event name already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 422, description = "Invalid input", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<EventsState>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<Uuid>,
    WithRejection(Json(req), _): ApiJson<EventRequest>,
) -> Result<Json<Event>, ServiceError> {
    let event = state.service.update(&user, event_id, req).await?;
    Ok(Json(event))
}

/// DELETE /events/{event_id} - Delete an event
#[utoipa::path(
    delete,
    path = "/events/{event_id}",
    params(("event_id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the organizer", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<EventsState>,
    AuthUser(user): AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    state.service.delete(&user, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
