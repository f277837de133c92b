// Resource entity
// A named, quantified need for an event with a live aggregate quantity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::ResourceCategory;

/// Version assigned to a freshly created resource.
pub const INITIAL_RESOURCE_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub identifier: Uuid,
    pub name: String,
    pub category: ResourceCategory,
    pub suggested_quantity: i32,
    /// Sum of all live contributions on this resource.
    pub current_quantity: i32,
    pub event_id: Uuid,
    /// Optimistic-lock token, incremented by exactly one on every quantity change.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row-level input for `ResourceStore::create`.
#[derive(Debug, Clone)]
pub struct NewResourceRow {
    pub name: String,
    pub category: ResourceCategory,
    pub suggested_quantity: i32,
    pub event_id: Uuid,
}

/// Use-case input for creating a resource together with its creator's contribution.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub name: String,
    pub category: ResourceCategory,
    pub initial_quantity: i32,
    pub suggested_quantity: Option<i32>,
    pub event_id: Uuid,
    pub creator_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributorInfo {
    pub user_email: String,
    pub quantity: i32,
    pub contributed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceWithContributors {
    pub resource: Resource,
    pub contributors: Vec<ContributorInfo>,
}
