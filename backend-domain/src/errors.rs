// Domain error taxonomy

use thiserror::Error;
use uuid::Uuid;

/// A value that failed to parse into a domain value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}'")]
pub struct InvalidValue {
    pub field: &'static str,
    pub value: String,
}

impl InvalidValue {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Failures surfaced by the store ports.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error(
        "optimistic lock failure for resource {resource_id} with version {expected_version}, \
         resource was modified by another user"
    )]
    OptimisticLock { resource_id: Uuid, expected_version: i32 },
    #[error("{entity} already exists: {key}")]
    Conflict { entity: &'static str, key: String },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Failures surfaced by the contribution engine to its callers.
#[derive(Debug, Error)]
pub enum ContributionError {
    #[error("{0} not found")]
    NotFound(String),
    #[error(
        "optimistic lock failure for resource {resource_id} with version {expected_version}, \
         resource was modified by another user"
    )]
    OptimisticLock { resource_id: Uuid, expected_version: i32 },
    #[error("cannot reduce by {requested}, current contribution is only {current}")]
    InsufficientContribution { current: i32, requested: i32 },
    #[error("quantity must be greater than 0, got {0}")]
    InvalidQuantity(i32),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("failed to manage contributions for {context}: {source}")]
    StoreFailure {
        context: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ContributionError {
    /// Lifts a store failure into the engine taxonomy. `context` names the
    /// resource or event the operation was working on.
    pub fn from_store(context: impl std::fmt::Display, err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, key } => {
                ContributionError::NotFound(format!("{} {}", entity, key))
            }
            StoreError::OptimisticLock {
                resource_id,
                expected_version,
            } => ContributionError::OptimisticLock {
                resource_id,
                expected_version,
            },
            StoreError::Conflict { entity, key } => {
                ContributionError::Conflict(format!("{} already exists: {}", entity, key))
            }
            StoreError::Backend(source) => ContributionError::StoreFailure {
                context: context.to_string(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_failure_keeps_resource_context() {
        let resource_id = Uuid::new_v4();
        let err = ContributionError::from_store(
            format!("resource {}", resource_id),
            StoreError::Backend(anyhow::anyhow!("disk I/O error")),
        );
        let message = err.to_string();
        assert!(message.contains(&resource_id.to_string()));
        assert!(message.contains("disk I/O error"));
    }

    #[test]
    fn optimistic_lock_passes_through_unchanged() {
        let resource_id = Uuid::new_v4();
        let err = ContributionError::from_store(
            "resource",
            StoreError::OptimisticLock {
                resource_id,
                expected_version: 4,
            },
        );
        match err {
            ContributionError::OptimisticLock {
                resource_id: id,
                expected_version,
            } => {
                assert_eq!(id, resource_id);
                assert_eq!(expected_version, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
