use std::str::FromStr;

use backend_domain::ports::{EventStore, ParticipantStore, UnitOfWork};
use backend_domain::{EventChanges, EventType, NewEvent};
use tracing::info;
use uuid::Uuid;

use crate::dtos::{EventDto, EventPayload};
use crate::{AppError, AppState};

/// Creates the event and enrolls its creator as a confirmed participant.
pub async fn create_event(
    state: &AppState,
    creator_email: &str,
    payload: EventPayload,
) -> Result<EventDto, AppError> {
    let changes = validate(payload)?;

    let mut uow = state.stores.begin().await?;
    let event = uow
        .create_event(NewEvent {
            name: changes.name,
            description: changes.description,
            event_date: changes.event_date,
            creator: creator_email.to_string(),
            location: changes.location,
            event_type: changes.event_type,
        })
        .await?;
    uow.find_or_create_participant(creator_email, event.identifier)
        .await?;
    uow.commit().await?;

    info!("event {} created by {}", event.identifier, creator_email);
    Ok(event.into())
}

pub async fn update_event(
    state: &AppState,
    event_id: Uuid,
    payload: EventPayload,
) -> Result<EventDto, AppError> {
    let changes = validate(payload)?;

    let mut uow = state.stores.begin().await?;
    let event = uow
        .update_event(event_id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;
    uow.commit().await?;
    Ok(event.into())
}

/// Only the creator may delete an event. Its resources, participants and
/// contributions go with it.
pub async fn delete_event(
    state: &AppState,
    caller_email: &str,
    event_id: Uuid,
) -> Result<(), AppError> {
    let mut uow = state.stores.begin().await?;
    let event = uow
        .find_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;
    if event.creator != caller_email {
        return Err(AppError::UnauthorizedDelete(format!(
            "only the creator can delete event {}",
            event_id
        )));
    }
    uow.delete_event(event_id).await?;
    uow.commit().await?;

    info!("event {} deleted by {}", event_id, caller_email);
    Ok(())
}

fn validate(payload: EventPayload) -> Result<EventChanges, AppError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("event name must not be blank".to_string()));
    }
    let location = payload.location.trim().to_string();
    if location.is_empty() {
        return Err(AppError::BadRequest(
            "event location must not be blank".to_string(),
        ));
    }
    let event_type = EventType::from_str(&payload.event_type)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    Ok(EventChanges {
        name,
        description: payload.description,
        event_date: payload.event_date,
        location,
        event_type,
    })
}
