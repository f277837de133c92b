use backend_domain::ports::{EventStore, UnitOfWork};

use crate::dtos::EventDto;
use crate::{AppError, AppState};

/// Events organized by the caller.
pub async fn list_events(state: &AppState, organizer: &str) -> Result<Vec<EventDto>, AppError> {
    let mut uow = state.stores.begin().await?;
    let events = uow.find_events_by_creator(organizer).await?;
    uow.commit().await?;
    Ok(events.into_iter().map(Into::into).collect())
}
