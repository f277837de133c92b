// Participant entity
// A user's membership record in an event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::ParticipantStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub identifier: Uuid,
    pub user_email: String,
    pub event_id: Uuid,
    pub status: ParticipantStatus,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub user_email: String,
    pub event_id: Uuid,
    pub status: ParticipantStatus,
}

impl NewParticipant {
    pub fn confirmed(user_email: impl Into<String>, event_id: Uuid) -> Self {
        Self {
            user_email: user_email.into(),
            event_id,
            status: ParticipantStatus::Confirmed,
        }
    }
}
