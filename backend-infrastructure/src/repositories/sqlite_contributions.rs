use async_trait::async_trait;
use backend_domain::entities::Contribution;
use backend_domain::errors::StoreError;
use backend_domain::ports::{ContributionStore, StoreResult};
use sqlx::FromRow;
use uuid::Uuid;

use super::sqlite_store::{backend, is_unique_violation, SqliteUnitOfWork};
use crate::utils::{current_millis, millis_to_utc, parse_uuid};

macro_rules! contribution_columns {
    () => {
        "id, participant_id, resource_id, quantity, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct ContributionRow {
    id: String,
    participant_id: String,
    resource_id: String,
    quantity: i32,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ContributionRow> for Contribution {
    type Error = StoreError;

    fn try_from(row: ContributionRow) -> Result<Self, Self::Error> {
        Ok(Contribution {
            identifier: parse_uuid("contribution.id", &row.id)?,
            participant_id: parse_uuid("contribution.participant_id", &row.participant_id)?,
            resource_id: parse_uuid("contribution.resource_id", &row.resource_id)?,
            quantity: row.quantity,
            created_at: millis_to_utc(row.created_at),
            updated_at: millis_to_utc(row.updated_at),
        })
    }
}

fn contribution_key(participant_id: Uuid, resource_id: Uuid) -> String {
    format!("participant {} on resource {}", participant_id, resource_id)
}

#[async_trait]
impl ContributionStore for SqliteUnitOfWork {
    async fn find_contribution(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
    ) -> StoreResult<Option<Contribution>> {
        let row = sqlx::query_as::<_, ContributionRow>(concat!(
            "SELECT ",
            contribution_columns!(),
            " FROM contribution WHERE participant_id = ? AND resource_id = ?"
        ))
        .bind(participant_id.to_string())
        .bind(resource_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("select contribution"))?;

        row.map(Contribution::try_from).transpose()
    }

    async fn find_contributions_by_resource(
        &mut self,
        resource_id: Uuid,
    ) -> StoreResult<Vec<Contribution>> {
        let rows = sqlx::query_as::<_, ContributionRow>(concat!(
            "SELECT ",
            contribution_columns!(),
            " FROM contribution WHERE resource_id = ? ORDER BY created_at, id"
        ))
        .bind(resource_id.to_string())
        .fetch_all(self.conn())
        .await
        .map_err(backend("select contributions by resource"))?;

        rows.into_iter().map(Contribution::try_from).collect()
    }

    async fn insert_contribution(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
        quantity: i32,
    ) -> StoreResult<Contribution> {
        let now = current_millis();
        let created = sqlx::query_as::<_, ContributionRow>(concat!(
            "INSERT INTO contribution (id, participant_id, resource_id, quantity, created_at, \
             updated_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING ",
            contribution_columns!()
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(participant_id.to_string())
        .bind(resource_id.to_string())
        .bind(quantity)
        .bind(now)
        .bind(now)
        .fetch_one(self.conn())
        .await;

        match created {
            Ok(row) => row.try_into(),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict {
                entity: "contribution",
                key: contribution_key(participant_id, resource_id),
            }),
            Err(err) => Err(backend("insert contribution")(err)),
        }
    }

    async fn update_contribution_quantity(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
        quantity: i32,
    ) -> StoreResult<Contribution> {
        let row = sqlx::query_as::<_, ContributionRow>(concat!(
            "UPDATE contribution SET quantity = ?, updated_at = ? \
             WHERE participant_id = ? AND resource_id = ? RETURNING ",
            contribution_columns!()
        ))
        .bind(quantity)
        .bind(current_millis())
        .bind(participant_id.to_string())
        .bind(resource_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("update contribution quantity"))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(StoreError::not_found(
                "contribution",
                contribution_key(participant_id, resource_id),
            )),
        }
    }

    async fn delete_contribution(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
    ) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM contribution WHERE participant_id = ? AND resource_id = ?")
                .bind(participant_id.to_string())
                .bind(resource_id.to_string())
                .execute(self.conn())
                .await
                .map_err(backend("delete contribution"))?;

        Ok(result.rows_affected() > 0)
    }
}
