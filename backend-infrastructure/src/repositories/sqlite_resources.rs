use std::str::FromStr;

use async_trait::async_trait;
use backend_domain::entities::{NewResourceRow, Resource, INITIAL_RESOURCE_VERSION};
use backend_domain::errors::StoreError;
use backend_domain::ports::{ResourceStore, StoreResult};
use backend_domain::value_objects::ResourceCategory;
use sqlx::FromRow;
use uuid::Uuid;

use super::sqlite_store::{backend, SqliteUnitOfWork};
use crate::utils::{current_millis, millis_to_utc, parse_uuid};

macro_rules! resource_columns {
    () => {
        "id, name, category, suggested_quantity, current_quantity, event_id, version, \
         created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct ResourceRow {
    id: String,
    name: String,
    category: String,
    suggested_quantity: i32,
    current_quantity: i32,
    event_id: String,
    version: i32,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ResourceRow> for Resource {
    type Error = StoreError;

    fn try_from(row: ResourceRow) -> Result<Self, Self::Error> {
        let category = ResourceCategory::from_str(&row.category)
            .map_err(|e| StoreError::Backend(anyhow::Error::new(e)))?;
        Ok(Resource {
            identifier: parse_uuid("resource.id", &row.id)?,
            name: row.name,
            category,
            suggested_quantity: row.suggested_quantity,
            current_quantity: row.current_quantity,
            event_id: parse_uuid("resource.event_id", &row.event_id)?,
            version: row.version,
            created_at: millis_to_utc(row.created_at),
            updated_at: millis_to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl ResourceStore for SqliteUnitOfWork {
    async fn create_resource(&mut self, row: NewResourceRow) -> StoreResult<Resource> {
        let now = current_millis();
        let created = sqlx::query_as::<_, ResourceRow>(concat!(
            "INSERT INTO resource (id, name, category, suggested_quantity, current_quantity, \
             event_id, version, created_at, updated_at) \
             VALUES (?, ?, ?, ?, 0, ?, ?, ?, ?) RETURNING ",
            resource_columns!()
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&row.name)
        .bind(row.category.as_str())
        .bind(row.suggested_quantity)
        .bind(row.event_id.to_string())
        .bind(INITIAL_RESOURCE_VERSION)
        .bind(now)
        .bind(now)
        .fetch_one(self.conn())
        .await
        .map_err(backend("insert resource"))?;

        created.try_into()
    }

    async fn find_resource(&mut self, resource_id: Uuid) -> StoreResult<Option<Resource>> {
        let row = sqlx::query_as::<_, ResourceRow>(concat!(
            "SELECT ",
            resource_columns!(),
            " FROM resource WHERE id = ?"
        ))
        .bind(resource_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("select resource"))?;

        row.map(Resource::try_from).transpose()
    }

    async fn find_resources_by_event(&mut self, event_id: Uuid) -> StoreResult<Vec<Resource>> {
        let rows = sqlx::query_as::<_, ResourceRow>(concat!(
            "SELECT ",
            resource_columns!(),
            " FROM resource WHERE event_id = ? ORDER BY created_at, id"
        ))
        .bind(event_id.to_string())
        .fetch_all(self.conn())
        .await
        .map_err(backend("select resources by event"))?;

        rows.into_iter().map(Resource::try_from).collect()
    }

    async fn apply_delta(
        &mut self,
        resource_id: Uuid,
        delta: i32,
        expected_version: i32,
    ) -> StoreResult<Resource> {
        let updated = sqlx::query_as::<_, ResourceRow>(concat!(
            "UPDATE resource \
             SET current_quantity = current_quantity + ?, version = version + 1, updated_at = ? \
             WHERE id = ? AND version = ? RETURNING ",
            resource_columns!()
        ))
        .bind(delta)
        .bind(current_millis())
        .bind(resource_id.to_string())
        .bind(expected_version)
        .fetch_optional(self.conn())
        .await
        .map_err(backend("update resource quantity"))?;

        if let Some(row) = updated {
            return row.try_into();
        }

        let exists = sqlx::query_scalar::<_, i64>("SELECT 1 FROM resource WHERE id = ?")
            .bind(resource_id.to_string())
            .fetch_optional(self.conn())
            .await
            .map_err(backend("select resource version"))?;

        match exists {
            Some(_) => Err(StoreError::OptimisticLock {
                resource_id,
                expected_version,
            }),
            None => Err(StoreError::not_found("resource", resource_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::sqlite_events::seed_event;
    use crate::repositories::SqliteStore;
    use backend_domain::ports::{UnitOfWork, UnitOfWorkFactory};

    fn cutlery(event_id: Uuid) -> NewResourceRow {
        NewResourceRow {
            name: "Forks".to_string(),
            category: ResourceCategory::Utensil,
            suggested_quantity: 12,
            event_id,
        }
    }

    #[tokio::test]
    async fn create_starts_empty_at_initial_version() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let mut uow = store.begin().await.unwrap();
        let event_id = seed_event(&mut *uow, "alice@example.com").await;

        let resource = uow.create_resource(cutlery(event_id)).await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(resource.current_quantity, 0);
        assert_eq!(resource.version, INITIAL_RESOURCE_VERSION);
        assert_eq!(resource.category, ResourceCategory::Utensil);
        assert_eq!(resource.event_id, event_id);
    }

    #[tokio::test]
    async fn apply_delta_bumps_version_by_one() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let mut uow = store.begin().await.unwrap();
        let event_id = seed_event(&mut *uow, "alice@example.com").await;
        let resource = uow.create_resource(cutlery(event_id)).await.unwrap();

        let updated = uow
            .apply_delta(resource.identifier, 4, resource.version)
            .await
            .unwrap();
        assert_eq!(updated.current_quantity, 4);
        assert_eq!(updated.version, resource.version + 1);

        let updated = uow
            .apply_delta(resource.identifier, -3, updated.version)
            .await
            .unwrap();
        assert_eq!(updated.current_quantity, 1);
        assert_eq!(updated.version, resource.version + 2);
    }

    #[tokio::test]
    async fn apply_delta_with_stale_version_is_optimistic_lock() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let mut uow = store.begin().await.unwrap();
        let event_id = seed_event(&mut *uow, "alice@example.com").await;
        let resource = uow.create_resource(cutlery(event_id)).await.unwrap();
        uow.apply_delta(resource.identifier, 2, resource.version)
            .await
            .unwrap();

        let err = uow
            .apply_delta(resource.identifier, 2, resource.version)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::OptimisticLock { expected_version, .. } if expected_version == resource.version
        ));

        let stored = uow.find_resource(resource.identifier).await.unwrap().unwrap();
        assert_eq!(stored.current_quantity, 2);
    }

    #[tokio::test]
    async fn apply_delta_on_missing_resource_is_not_found() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let mut uow = store.begin().await.unwrap();

        let err = uow.apply_delta(Uuid::new_v4(), 1, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "resource", .. }));
    }

    #[tokio::test]
    async fn dropped_unit_of_work_rolls_back() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        let mut uow = store.begin().await.unwrap();
        let event_id = seed_event(&mut *uow, "alice@example.com").await;
        uow.commit().await.unwrap();
        {
            let mut uow = store.begin().await.unwrap();
            uow.create_resource(cutlery(event_id)).await.unwrap();
        }

        let mut uow = store.begin().await.unwrap();
        assert!(uow.find_resources_by_event(event_id).await.unwrap().is_empty());
    }
}
