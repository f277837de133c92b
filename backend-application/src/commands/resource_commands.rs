use std::str::FromStr;

use backend_domain::{NewResource, ResourceCategory};
use tracing::{info, warn};
use uuid::Uuid;

use crate::dtos::{CreateResourcePayload, ResourceDto};
use crate::{AppError, AppState};

pub async fn create_resource(
    state: &AppState,
    creator_email: &str,
    event_id: Uuid,
    payload: CreateResourcePayload,
) -> Result<ResourceDto, AppError> {
    let category = ResourceCategory::from_str(&payload.category)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let resource = state
        .engine
        .create_resource(NewResource {
            name: payload.name,
            category,
            initial_quantity: payload.quantity,
            suggested_quantity: payload.suggested_quantity,
            event_id,
            creator_email: creator_email.to_string(),
        })
        .await
        .map_err(|err| {
            state.metrics.record_failure(&err);
            warn!("failed to create resource in event {}: {}", event_id, err);
            AppError::Contribution(err)
        })?;

    if resource.current_quantity > 0 {
        state.metrics.record_added();
    }
    info!(
        "resource {} created in event {} by {}",
        resource.identifier, event_id, creator_email
    );
    Ok(resource.into())
}
