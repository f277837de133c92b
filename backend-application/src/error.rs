use backend_domain::errors::{ContributionError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    UnauthorizedDelete(String),
    #[error(transparent)]
    Contribution(#[from] ContributionError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, key } => AppError::NotFound(format!("{} {}", entity, key)),
            StoreError::Conflict { .. } | StoreError::OptimisticLock { .. } => {
                AppError::Conflict(err.to_string())
            }
            StoreError::Backend(source) => AppError::Internal(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_conflict_becomes_app_conflict() {
        let err = AppError::from(StoreError::Conflict {
            entity: "participant",
            key: "alice@example.com".to_string(),
        });
        match err {
            AppError::Conflict(message) => assert!(message.contains("alice@example.com")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn store_backend_failure_is_internal() {
        let err = AppError::from(StoreError::Backend(anyhow::anyhow!("database is locked")));
        assert!(matches!(err, AppError::Internal(_)));
    }
}
