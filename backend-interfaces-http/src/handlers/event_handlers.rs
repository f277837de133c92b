use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::event_commands;
use backend_application::dtos::{EventDto, EventPayload};
use backend_application::queries::event_queries;
use backend_application::AppState;

use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::middleware::require_user;

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<EventPayload>,
) -> Result<(StatusCode, Json<EventDto>), HttpError> {
    let creator_email = require_user(&state.config, &headers)?;
    let event = event_commands::create_event(&state, &creator_email, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Events organized by the caller.
pub async fn list_my_events(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<EventDto>>, HttpError> {
    let organizer = require_user(&state.config, &headers)?;
    let events = event_queries::list_events(&state, &organizer).await?;
    Ok(Json(events))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<EventPayload>,
) -> Result<Json<EventDto>, HttpError> {
    require_user(&state.config, &headers)?;
    let event = event_commands::update_event(&state, event_id, payload).await?;
    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let caller_email = require_user(&state.config, &headers)?;
    event_commands::delete_event(&state, &caller_email, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
