use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    Contribution, Event, EventChanges, NewEvent, NewParticipant, NewResourceRow, Participant,
    Resource,
};
use crate::errors::StoreError;
use crate::value_objects::ParticipantStatus;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EventStore: Send {
    /// Fails with `Conflict` when the creator already owns an event of that name.
    async fn create_event(&mut self, event: NewEvent) -> StoreResult<Event>;
    async fn find_event(&mut self, event_id: Uuid) -> StoreResult<Option<Event>>;
    async fn find_events_by_creator(&mut self, creator: &str) -> StoreResult<Vec<Event>>;
    async fn update_event(
        &mut self,
        event_id: Uuid,
        changes: EventChanges,
    ) -> StoreResult<Option<Event>>;
    /// Removes the event together with its resources, participants and
    /// contributions. Returns whether a row was removed.
    async fn delete_event(&mut self, event_id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait ResourceStore: Send {
    async fn create_resource(&mut self, row: NewResourceRow) -> StoreResult<Resource>;
    async fn find_resource(&mut self, resource_id: Uuid) -> StoreResult<Option<Resource>>;
    async fn find_resources_by_event(&mut self, event_id: Uuid) -> StoreResult<Vec<Resource>>;

    /// Adds `delta` to the resource's current quantity and bumps its version,
    /// provided the stored version still equals `expected_version`.
    ///
    /// Fails with `NotFound` when the resource does not exist and with
    /// `OptimisticLock` when it exists at another version. The quantity is
    /// never clamped and the write is never retried.
    async fn apply_delta(
        &mut self,
        resource_id: Uuid,
        delta: i32,
        expected_version: i32,
    ) -> StoreResult<Resource>;
}

#[async_trait]
pub trait ParticipantStore: Send {
    async fn find_participant(
        &mut self,
        user_email: &str,
        event_id: Uuid,
    ) -> StoreResult<Option<Participant>>;
    async fn find_participant_by_id(
        &mut self,
        participant_id: Uuid,
    ) -> StoreResult<Option<Participant>>;
    async fn find_participants_by_event(&mut self, event_id: Uuid)
        -> StoreResult<Vec<Participant>>;
    /// Fails with `Conflict` when the (user, event) pair already exists.
    async fn create_participant(&mut self, participant: NewParticipant) -> StoreResult<Participant>;
    /// Atomic upsert: concurrent callers for the same pair all observe one row.
    async fn find_or_create_participant(
        &mut self,
        user_email: &str,
        event_id: Uuid,
    ) -> StoreResult<Participant>;
    async fn update_participant_status(
        &mut self,
        user_email: &str,
        event_id: Uuid,
        status: ParticipantStatus,
    ) -> StoreResult<Option<Participant>>;
}

#[async_trait]
pub trait ContributionStore: Send {
    async fn find_contribution(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
    ) -> StoreResult<Option<Contribution>>;
    async fn find_contributions_by_resource(
        &mut self,
        resource_id: Uuid,
    ) -> StoreResult<Vec<Contribution>>;
    async fn insert_contribution(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
        quantity: i32,
    ) -> StoreResult<Contribution>;
    async fn update_contribution_quantity(
        &mut self,
        participant_id: Uuid,
        resource_id: Uuid,
        quantity: i32,
    ) -> StoreResult<Contribution>;
    /// Returns whether a row was removed.
    async fn delete_contribution(&mut self, participant_id: Uuid, resource_id: Uuid)
        -> StoreResult<bool>;
}

/// The stores bound to one transaction. Dropping a unit of work without
/// committing rolls it back.
#[async_trait]
pub trait UnitOfWork:
    EventStore + ResourceStore + ParticipantStore + ContributionStore + Send
{
    async fn commit(self: Box<Self>) -> StoreResult<()>;
    async fn rollback(self: Box<Self>) -> StoreResult<()>;
}

#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> StoreResult<Box<dyn UnitOfWork>>;
    async fn ping(&self) -> StoreResult<()>;
}
