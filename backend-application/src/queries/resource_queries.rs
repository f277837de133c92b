use uuid::Uuid;

use crate::dtos::ResourceWithContributorsDto;
use crate::{AppError, AppState};

pub async fn list_resources(
    state: &AppState,
    event_id: Uuid,
) -> Result<Vec<ResourceWithContributorsDto>, AppError> {
    let listed = state.engine.resources_with_contributors(event_id).await?;
    Ok(listed.into_iter().map(Into::into).collect())
}
