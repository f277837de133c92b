use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::resource_commands;
use backend_application::dtos::{CreateResourcePayload, ResourceDto, ResourceWithContributorsDto};
use backend_application::queries::resource_queries;
use backend_application::AppState;

use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::middleware::{authorize, require_user};

pub async fn create_resource(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<CreateResourcePayload>,
) -> Result<(StatusCode, Json<ResourceDto>), HttpError> {
    let creator_email = require_user(&state.config, &headers)?;
    let resource =
        resource_commands::create_resource(&state, &creator_email, event_id, payload).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

pub async fn list_resources(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Vec<ResourceWithContributorsDto>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let resources = resource_queries::list_resources(&state, event_id).await?;
    Ok(Json(resources))
}
