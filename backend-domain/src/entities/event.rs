// Event entity
// The gathering that owns resources and participants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::EventType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub identifier: Uuid,
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    /// E-mail of the organizer. Only the creator may delete the event.
    pub creator: String,
    pub location: String,
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub creator: String,
    pub location: String,
    pub event_type: EventType,
}

#[derive(Debug, Clone)]
pub struct EventChanges {
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub event_type: EventType,
}
