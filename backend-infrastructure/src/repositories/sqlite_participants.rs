use std::str::FromStr;

use async_trait::async_trait;
use backend_domain::entities::{NewParticipant, Participant};
use backend_domain::errors::StoreError;
use backend_domain::ports::{ParticipantStore, StoreResult};
use backend_domain::value_objects::ParticipantStatus;
use sqlx::FromRow;
use uuid::Uuid;

use super::sqlite_store::{backend, is_unique_violation, SqliteUnitOfWork};
use crate::utils::{current_millis, millis_to_utc, parse_uuid};

macro_rules! participant_columns {
    () => {
        "id, user_email, event_id, status, joined_at, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct ParticipantRow {
    id: String,
    user_email: String,
    event_id: String,
    status: String,
    joined_at: i64,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = StoreError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let status = ParticipantStatus::from_str(&row.status)
            .map_err(|e| StoreError::Backend(anyhow::Error::new(e)))?;
        Ok(Participant {
            identifier: parse_uuid("participant.id", &row.id)?,
            user_email: row.user_email,
            event_id: parse_uuid("participant.event_id", &row.event_id)?,
            status,
            joined_at: millis_to_utc(row.joined_at),
            created_at: millis_to_utc(row.created_at),
            updated_at: millis_to_utc(row.updated_at),
        })
    }
}

#[async_trait]
impl ParticipantStore for SqliteUnitOfWork {
    async fn find_participant(
        &mut self,
        user_email: &str,
        event_id: Uuid,
    ) -> StoreResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(concat!(
            "SELECT ",
            participant_columns!(),
            " FROM participant WHERE user_email = ? AND event_id = ?"
        ))
        .bind(user_email)
        .bind(event_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("select participant"))?;

        row.map(Participant::try_from).transpose()
    }

    async fn find_participant_by_id(
        &mut self,
        participant_id: Uuid,
    ) -> StoreResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(concat!(
            "SELECT ",
            participant_columns!(),
            " FROM participant WHERE id = ?"
        ))
        .bind(participant_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("select participant by id"))?;

        row.map(Participant::try_from).transpose()
    }

    async fn find_participants_by_event(
        &mut self,
        event_id: Uuid,
    ) -> StoreResult<Vec<Participant>> {
        let rows = sqlx::query_as::<_, ParticipantRow>(concat!(
            "SELECT ",
            participant_columns!(),
            " FROM participant WHERE event_id = ? ORDER BY joined_at, id"
        ))
        .bind(event_id.to_string())
        .fetch_all(self.conn())
        .await
        .map_err(backend("select participants by event"))?;

        rows.into_iter().map(Participant::try_from).collect()
    }

    async fn create_participant(&mut self, participant: NewParticipant) -> StoreResult<Participant> {
        let now = current_millis();
        let created = sqlx::query_as::<_, ParticipantRow>(concat!(
            "INSERT INTO participant (id, user_email, event_id, status, joined_at, created_at, \
             updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING ",
            participant_columns!()
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&participant.user_email)
        .bind(participant.event_id.to_string())
        .bind(participant.status.as_str())
        .bind(now)
        .bind(now)
        .bind(now)
        .fetch_one(self.conn())
        .await;

        match created {
            Ok(row) => row.try_into(),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict {
                entity: "participant",
                key: format!("{} in event {}", participant.user_email, participant.event_id),
            }),
            Err(err) => Err(backend("insert participant")(err)),
        }
    }

    async fn find_or_create_participant(
        &mut self,
        user_email: &str,
        event_id: Uuid,
    ) -> StoreResult<Participant> {
        let now = current_millis();
        sqlx::query(
            "INSERT INTO participant (id, user_email, event_id, status, joined_at, created_at, \
             updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_email, event_id) DO NOTHING",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_email)
        .bind(event_id.to_string())
        .bind(ParticipantStatus::Confirmed.as_str())
        .bind(now)
        .bind(now)
        .bind(now)
        .execute(self.conn())
        .await
        .map_err(backend("upsert participant"))?;

        self.find_participant(user_email, event_id)
            .await?
            .ok_or_else(|| StoreError::not_found("participant", user_email))
    }

    async fn update_participant_status(
        &mut self,
        user_email: &str,
        event_id: Uuid,
        status: ParticipantStatus,
    ) -> StoreResult<Option<Participant>> {
        let row = sqlx::query_as::<_, ParticipantRow>(concat!(
            "UPDATE participant SET status = ?, updated_at = ? \
             WHERE user_email = ? AND event_id = ? RETURNING ",
            participant_columns!()
        ))
        .bind(status.as_str())
        .bind(current_millis())
        .bind(user_email)
        .bind(event_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("update participant status"))?;

        row.map(Participant::try_from).transpose()
    }
}
