use std::str::FromStr;

use backend_domain::ports::{EventStore, ParticipantStore, UnitOfWork};
use backend_domain::{NewParticipant, ParticipantStatus};
use uuid::Uuid;

use crate::dtos::{CreateParticipantPayload, ParticipantDto, UpdateParticipantPayload};
use crate::{AppError, AppState};

pub async fn create_participant(
    state: &AppState,
    caller_email: &str,
    event_id: Uuid,
    payload: CreateParticipantPayload,
) -> Result<ParticipantDto, AppError> {
    let user_email = payload
        .user_email
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .unwrap_or_else(|| caller_email.to_string());
    let status = parse_status(payload.status.as_deref())?;

    let mut uow = state.stores.begin().await?;
    if uow.find_event(event_id).await?.is_none() {
        return Err(AppError::NotFound(format!("event {}", event_id)));
    }
    let participant = uow
        .create_participant(NewParticipant {
            user_email,
            event_id,
            status,
        })
        .await?;
    uow.commit().await?;
    Ok(participant.into())
}

pub async fn update_participant_status(
    state: &AppState,
    user_email: &str,
    event_id: Uuid,
    payload: UpdateParticipantPayload,
) -> Result<ParticipantDto, AppError> {
    let status = parse_status(Some(&payload.status))?;

    let mut uow = state.stores.begin().await?;
    let participant = uow
        .update_participant_status(user_email, event_id, status)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("participant {} in event {}", user_email, event_id))
        })?;
    uow.commit().await?;
    Ok(participant.into())
}

fn parse_status(raw: Option<&str>) -> Result<ParticipantStatus, AppError> {
    match raw {
        None => Ok(ParticipantStatus::default()),
        Some(value) => {
            ParticipantStatus::from_str(value).map_err(|err| AppError::BadRequest(err.to_string()))
        }
    }
}
