use uuid::Uuid;

use crate::dtos::ContributionDto;
use crate::{AppError, AppState};

pub async fn list_contributions(
    state: &AppState,
    event_id: Uuid,
    resource_id: Uuid,
) -> Result<Vec<ContributionDto>, AppError> {
    let contributions = state.engine.find_by_resource(event_id, resource_id).await?;
    Ok(contributions.into_iter().map(Into::into).collect())
}
