use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::participant_commands;
use backend_application::dtos::{
    CreateParticipantPayload, ParticipantDto, UpdateParticipantPayload,
};
use backend_application::queries::participant_queries;
use backend_application::AppState;

use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::middleware::{authorize, require_user};

pub async fn create_participant(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateParticipantPayload>,
) -> Result<(StatusCode, Json<ParticipantDto>), HttpError> {
    let caller_email = require_user(&state.config, &headers)?;
    let participant =
        participant_commands::create_participant(&state, &caller_email, event_id, payload).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

pub async fn list_participants(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Vec<ParticipantDto>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let participants = participant_queries::list_participants(&state, event_id).await?;
    Ok(Json(participants))
}

pub async fn update_my_status(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<UpdateParticipantPayload>,
) -> Result<Json<ParticipantDto>, HttpError> {
    let user_email = require_user(&state.config, &headers)?;
    let participant =
        participant_commands::update_participant_status(&state, &user_email, event_id, payload)
            .await?;
    Ok(Json(participant))
}
