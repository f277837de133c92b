use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use backend_application::AppError;
use backend_domain::errors::ContributionError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    InsufficientContribution(String),
    NotFound(String),
    Conflict(String),
    UnauthorizedDelete(String),
    OptimisticLock(String),
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            err @ AppError::NotFound(_) => HttpError::NotFound(err.to_string()),
            AppError::Conflict(msg) => HttpError::Conflict(msg),
            AppError::UnauthorizedDelete(msg) => HttpError::UnauthorizedDelete(msg),
            AppError::Contribution(err) => HttpError::from(err),
            AppError::Internal(err) => HttpError::Internal(format!("{:#}", err)),
        }
    }
}

impl From<ContributionError> for HttpError {
    fn from(err: ContributionError) -> Self {
        let message = err.to_string();
        match err {
            ContributionError::NotFound(_) => HttpError::NotFound(message),
            ContributionError::OptimisticLock { .. } => HttpError::OptimisticLock(message),
            ContributionError::InsufficientContribution { .. } => {
                HttpError::InsufficientContribution(message)
            }
            ContributionError::InvalidQuantity(_) | ContributionError::InvalidInput(_) => {
                HttpError::BadRequest(message)
            }
            ContributionError::Conflict(_) => HttpError::Conflict(message),
            ContributionError::StoreFailure { .. } => HttpError::Internal(message),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        HttpError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string(), None),
            HttpError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, format!("bad request: {}", msg), None)
            }
            HttpError::InsufficientContribution(msg) => (
                StatusCode::BAD_REQUEST,
                msg,
                Some("INSUFFICIENT_CONTRIBUTION"),
            ),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            HttpError::UnauthorizedDelete(msg) => {
                (StatusCode::FORBIDDEN, msg, Some("UNAUTHORIZED_DELETE"))
            }
            HttpError::OptimisticLock(msg) => {
                (StatusCode::CONFLICT, msg, Some("OPTIMISTIC_LOCK_FAILURE"))
            }
            HttpError::Internal(msg) => {
                error!("request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
        };
        (status, Json(ErrorBody { error: message, kind })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn optimistic_lock_is_conflict_with_type() {
        let response = HttpError::from(ContributionError::OptimisticLock {
            resource_id: Uuid::new_v4(),
            expected_version: 2,
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["type"], "OPTIMISTIC_LOCK_FAILURE");
    }

    #[tokio::test]
    async fn insufficient_contribution_is_bad_request_with_type() {
        let response = HttpError::from(ContributionError::InsufficientContribution {
            current: 1,
            requested: 4,
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["type"], "INSUFFICIENT_CONTRIBUTION");
        assert!(body["error"].as_str().unwrap().contains("only 1"));
    }

    #[tokio::test]
    async fn plain_errors_carry_no_type() {
        let response =
            HttpError::from(AppError::NotFound("participant x".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert!(body.get("type").is_none());
        assert_eq!(body["error"], "participant x not found");
    }

    #[tokio::test]
    async fn delete_by_non_creator_is_forbidden_with_type() {
        let response = HttpError::from(AppError::UnauthorizedDelete(
            "only the creator can delete event x".to_string(),
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["type"], "UNAUTHORIZED_DELETE");
    }

    #[test]
    fn invalid_quantity_is_bad_request() {
        let response = HttpError::from(AppError::Contribution(
            ContributionError::InvalidQuantity(0),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
