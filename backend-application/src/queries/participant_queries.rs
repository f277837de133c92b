use backend_domain::ports::{ParticipantStore, UnitOfWork};
use uuid::Uuid;

use crate::dtos::ParticipantDto;
use crate::{AppError, AppState};

pub async fn list_participants(
    state: &AppState,
    event_id: Uuid,
) -> Result<Vec<ParticipantDto>, AppError> {
    let mut uow = state.stores.begin().await?;
    let participants = uow.find_participants_by_event(event_id).await?;
    uow.commit().await?;
    Ok(participants.into_iter().map(Into::into).collect())
}
