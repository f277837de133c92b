use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::contribution_commands;
use backend_application::dtos::{ContributionDto, ContributionPayload};
use backend_application::queries::contribution_queries;
use backend_application::AppState;

use crate::error::HttpError;
use crate::extract::ApiJson;
use crate::middleware::{authorize, require_user};

pub async fn list_contributions(
    State(state): State<AppState>,
    Path((event_id, resource_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<Json<Vec<ContributionDto>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let contributions =
        contribution_queries::list_contributions(&state, event_id, resource_id).await?;
    Ok(Json(contributions))
}

pub async fn add_contribution(
    State(state): State<AppState>,
    Path((event_id, resource_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<ContributionPayload>,
) -> Result<Json<ContributionDto>, HttpError> {
    let user_email = require_user(&state.config, &headers)?;
    let contribution =
        contribution_commands::add_contribution(&state, &user_email, event_id, resource_id, payload)
            .await?;
    Ok(Json(contribution))
}

pub async fn reduce_contribution(
    State(state): State<AppState>,
    Path((event_id, resource_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
    ApiJson(payload): ApiJson<ContributionPayload>,
) -> Result<Response, HttpError> {
    let user_email = require_user(&state.config, &headers)?;
    let remaining = contribution_commands::reduce_contribution(
        &state,
        &user_email,
        event_id,
        resource_id,
        payload,
    )
    .await?;
    Ok(match remaining {
        Some(contribution) => Json(contribution).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn delete_contribution(
    State(state): State<AppState>,
    Path((event_id, resource_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    let user_email = require_user(&state.config, &headers)?;
    contribution_commands::delete_contribution(&state, &user_email, event_id, resource_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
