use backend_domain::errors::ContributionError;
use tracing::warn;
use uuid::Uuid;

use crate::dtos::{ContributionDto, ContributionPayload};
use crate::{AppError, AppState};

pub async fn add_contribution(
    state: &AppState,
    user_email: &str,
    event_id: Uuid,
    resource_id: Uuid,
    payload: ContributionPayload,
) -> Result<ContributionDto, AppError> {
    let contribution = state
        .engine
        .add_or_update(user_email, event_id, resource_id, payload.quantity)
        .await
        .map_err(|err| rejected(state, err))?;
    state.metrics.record_added();
    Ok(contribution.into())
}

/// `None` means the contribution reached zero and was removed.
pub async fn reduce_contribution(
    state: &AppState,
    user_email: &str,
    event_id: Uuid,
    resource_id: Uuid,
    payload: ContributionPayload,
) -> Result<Option<ContributionDto>, AppError> {
    let remaining = state
        .engine
        .reduce(user_email, event_id, resource_id, payload.quantity)
        .await
        .map_err(|err| rejected(state, err))?;
    state.metrics.record_reduced();
    Ok(remaining.map(Into::into))
}

pub async fn delete_contribution(
    state: &AppState,
    user_email: &str,
    event_id: Uuid,
    resource_id: Uuid,
) -> Result<(), AppError> {
    let removed = state
        .engine
        .delete(user_email, event_id, resource_id)
        .await
        .map_err(|err| rejected(state, err))?;
    if removed {
        state.metrics.record_deleted();
    }
    Ok(())
}

fn rejected(state: &AppState, err: ContributionError) -> AppError {
    state.metrics.record_failure(&err);
    match &err {
        ContributionError::OptimisticLock { .. } | ContributionError::StoreFailure { .. } => {
            warn!("contribution update rejected: {}", err);
        }
        _ => {}
    }
    AppError::Contribution(err)
}
