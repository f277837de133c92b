// Wire shapes for the HTTP layer (camelCase JSON)

use backend_domain::{
    Contribution, ContributorInfo, Event, EventType, Participant, ParticipantStatus, Resource,
    ResourceCategory, ResourceWithContributors,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of both event creation and event update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub creator: String,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.identifier,
            name: event.name,
            description: event.description,
            event_date: event.event_date,
            creator: event.creator,
            location: event.location,
            event_type: event.event_type,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPayload {
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDto {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub resource_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contribution> for ContributionDto {
    fn from(contribution: Contribution) -> Self {
        Self {
            id: contribution.identifier,
            participant_id: contribution.participant_id,
            resource_id: contribution.resource_id,
            quantity: contribution.quantity,
            created_at: contribution.created_at,
            updated_at: contribution.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourcePayload {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub quantity: i32,
    pub suggested_quantity: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDto {
    pub id: Uuid,
    pub name: String,
    pub category: ResourceCategory,
    pub suggested_quantity: i32,
    pub current_quantity: i32,
    pub event_id: Uuid,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceDto {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.identifier,
            name: resource.name,
            category: resource.category,
            suggested_quantity: resource.suggested_quantity,
            current_quantity: resource.current_quantity,
            event_id: resource.event_id,
            version: resource.version,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorDto {
    pub user_email: String,
    pub quantity: i32,
    pub contributed_at: DateTime<Utc>,
}

impl From<ContributorInfo> for ContributorDto {
    fn from(info: ContributorInfo) -> Self {
        Self {
            user_email: info.user_email,
            quantity: info.quantity,
            contributed_at: info.contributed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceWithContributorsDto {
    #[serde(flatten)]
    pub resource: ResourceDto,
    pub contributors: Vec<ContributorDto>,
}

impl From<ResourceWithContributors> for ResourceWithContributorsDto {
    fn from(listed: ResourceWithContributors) -> Self {
        Self {
            resource: listed.resource.into(),
            contributors: listed.contributors.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantPayload {
    /// Defaults to the caller.
    pub user_email: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantPayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: Uuid,
    pub user_email: String,
    pub event_id: Uuid,
    pub status: ParticipantStatus,
    pub joined_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            id: participant.identifier,
            user_email: participant.user_email,
            event_id: participant.event_id,
            status: participant.status,
            joined_at: participant.joined_at,
            created_at: participant.created_at,
            updated_at: participant.updated_at,
        }
    }
}
