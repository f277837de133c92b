use std::str::FromStr;

use async_trait::async_trait;
use backend_domain::entities::{Event, EventChanges, NewEvent};
use backend_domain::errors::StoreError;
use backend_domain::ports::{EventStore, StoreResult};
use backend_domain::value_objects::EventType;
use sqlx::FromRow;
use uuid::Uuid;

use super::sqlite_store::{backend, is_unique_violation, SqliteUnitOfWork};
use crate::utils::{current_millis, millis_to_utc, parse_uuid};

macro_rules! event_columns {
    () => {
        "id, name, description, event_date, creator, location, type, created_at, updated_at"
    };
}

#[derive(Debug, FromRow)]
struct EventRow {
    id: String,
    name: String,
    description: String,
    event_date: i64,
    creator: String,
    location: String,
    #[sqlx(rename = "type")]
    event_type: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<EventRow> for Event {
    type Error = StoreError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let event_type = EventType::from_str(&row.event_type)
            .map_err(|e| StoreError::Backend(anyhow::Error::new(e)))?;
        Ok(Event {
            identifier: parse_uuid("event.id", &row.id)?,
            name: row.name,
            description: row.description,
            event_date: millis_to_utc(row.event_date),
            creator: row.creator,
            location: row.location,
            event_type,
            created_at: millis_to_utc(row.created_at),
            updated_at: millis_to_utc(row.updated_at),
        })
    }
}

fn name_taken(name: &str) -> StoreError {
    StoreError::Conflict {
        entity: "event",
        key: name.to_string(),
    }
}

#[async_trait]
impl EventStore for SqliteUnitOfWork {
    async fn create_event(&mut self, event: NewEvent) -> StoreResult<Event> {
        let now = current_millis();
        let created = sqlx::query_as::<_, EventRow>(concat!(
            "INSERT INTO event (id, name, description, event_date, creator, location, type, \
             created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING ",
            event_columns!()
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.event_date.timestamp_millis())
        .bind(&event.creator)
        .bind(&event.location)
        .bind(event.event_type.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(self.conn())
        .await;

        match created {
            Ok(row) => row.try_into(),
            Err(err) if is_unique_violation(&err) => Err(name_taken(&event.name)),
            Err(err) => Err(backend("insert event")(err)),
        }
    }

    async fn find_event(&mut self, event_id: Uuid) -> StoreResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(concat!(
            "SELECT ",
            event_columns!(),
            " FROM event WHERE id = ?"
        ))
        .bind(event_id.to_string())
        .fetch_optional(self.conn())
        .await
        .map_err(backend("select event"))?;

        row.map(Event::try_from).transpose()
    }

    async fn find_events_by_creator(&mut self, creator: &str) -> StoreResult<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(concat!(
            "SELECT ",
            event_columns!(),
            " FROM event WHERE creator = ? ORDER BY event_date, id"
        ))
        .bind(creator)
        .fetch_all(self.conn())
        .await
        .map_err(backend("select events by creator"))?;

        rows.into_iter().map(Event::try_from).collect()
    }

    async fn update_event(
        &mut self,
        event_id: Uuid,
        changes: EventChanges,
    ) -> StoreResult<Option<Event>> {
        let updated = sqlx::query_as::<_, EventRow>(concat!(
            "UPDATE event SET name = ?, description = ?, event_date = ?, location = ?, type = ?, \
             updated_at = ? WHERE id = ? RETURNING ",
            event_columns!()
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.event_date.timestamp_millis())
        .bind(&changes.location)
        .bind(changes.event_type.as_str())
        .bind(current_millis())
        .bind(event_id.to_string())
        .fetch_optional(self.conn())
        .await;

        match updated {
            Ok(row) => row.map(Event::try_from).transpose(),
            Err(err) if is_unique_violation(&err) => Err(name_taken(&changes.name)),
            Err(err) => Err(backend("update event")(err)),
        }
    }

    async fn delete_event(&mut self, event_id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM event WHERE id = ?")
            .bind(event_id.to_string())
            .execute(self.conn())
            .await
            .map_err(backend("delete event"))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Inserts an event owned by `creator` so rows referencing it can be created.
#[cfg(test)]
pub(crate) async fn seed_event(
    uow: &mut dyn backend_domain::ports::UnitOfWork,
    creator: &str,
) -> Uuid {
    uow.create_event(NewEvent {
        name: format!("event {}", Uuid::new_v4()),
        description: String::new(),
        event_date: chrono::Utc::now(),
        creator: creator.to_string(),
        location: "Lyon".to_string(),
        event_type: EventType::Party,
    })
    .await
    .unwrap()
    .identifier
}
