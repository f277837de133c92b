// Contribution entity
// One participant's brought quantity toward a resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A live contribution. `quantity` is always > 0; a zero contribution is
/// represented by the row being absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub identifier: Uuid,
    pub participant_id: Uuid,
    pub resource_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
