use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::entities::{
    Contribution, ContributorInfo, NewResource, NewResourceRow, Resource, ResourceWithContributors,
};
use crate::errors::{ContributionError, StoreError};
use crate::ports::{
    ContributionStore, EventStore, ParticipantStore, ResourceStore, UnitOfWork, UnitOfWorkFactory,
};

/// Keeps every resource's aggregate quantity equal to the sum of its live
/// contributions.
///
/// Each mutating operation runs the contribution write and the resource
/// delta inside a single unit of work: both commit or neither does. Version
/// conflicts on the resource are surfaced as
/// [`ContributionError::OptimisticLock`] and are never retried here.
pub struct ContributionEngine {
    stores: Arc<dyn UnitOfWorkFactory>,
}

impl ContributionEngine {
    pub fn new(stores: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { stores }
    }

    /// Adds `quantity` to the caller's contribution on the resource, creating
    /// the participant and the contribution when they do not exist yet.
    pub async fn add_or_update(
        &self,
        user_email: &str,
        event_id: Uuid,
        resource_id: Uuid,
        quantity: i32,
    ) -> Result<Contribution, ContributionError> {
        ensure_positive(quantity)?;
        let mut uow = self.begin(&ResourceContext(resource_id)).await?;
        let result = add_within(&mut *uow, user_email, event_id, resource_id, quantity).await;
        finish(uow, &ResourceContext(resource_id), result).await
    }

    /// Removes `quantity` from the caller's contribution. Returns `None` when
    /// the contribution reached zero and its row was deleted.
    pub async fn reduce(
        &self,
        user_email: &str,
        event_id: Uuid,
        resource_id: Uuid,
        quantity: i32,
    ) -> Result<Option<Contribution>, ContributionError> {
        ensure_positive(quantity)?;
        let mut uow = self.begin(&ResourceContext(resource_id)).await?;
        let result =
            reduce_within(&mut *uow, user_email, event_id, resource_id, quantity).await;
        finish(uow, &ResourceContext(resource_id), result).await
    }

    /// Withdraws the caller's whole contribution and returns whether a row was
    /// removed. Missing participants or contributions make this a successful
    /// no-op.
    pub async fn delete(
        &self,
        user_email: &str,
        event_id: Uuid,
        resource_id: Uuid,
    ) -> Result<bool, ContributionError> {
        let mut uow = self.begin(&ResourceContext(resource_id)).await?;
        let result = delete_within(&mut *uow, user_email, event_id, resource_id).await;
        finish(uow, &ResourceContext(resource_id), result).await
    }

    /// Lists the contributions on a resource of the given event. A resource
    /// that belongs to another event is reported as not found.
    pub async fn find_by_resource(
        &self,
        event_id: Uuid,
        resource_id: Uuid,
    ) -> Result<Vec<Contribution>, ContributionError> {
        let context = ResourceContext(resource_id);
        let mut uow = self.begin(&context).await?;
        let result = async {
            require_event_resource(&mut *uow, event_id, resource_id).await?;
            uow.find_contributions_by_resource(resource_id)
                .await
                .map_err(lift(&context))
        }
        .await;
        finish(uow, &context, result).await
    }

    /// Creates a resource and records the creator's initial quantity as their
    /// contribution, in the same unit of work.
    pub async fn create_resource(&self, request: NewResource) -> Result<Resource, ContributionError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(ContributionError::InvalidInput(
                "resource name is required".to_string(),
            ));
        }
        if request.initial_quantity < 0 {
            return Err(ContributionError::InvalidQuantity(request.initial_quantity));
        }
        let suggested_quantity = request.suggested_quantity.unwrap_or(request.initial_quantity);
        if suggested_quantity < 0 {
            return Err(ContributionError::InvalidInput(format!(
                "suggested quantity must not be negative, got {}",
                suggested_quantity
            )));
        }

        let context = EventContext(request.event_id);
        let mut uow = self.begin(&context).await?;
        let result = async {
            if uow
                .find_event(request.event_id)
                .await
                .map_err(lift(&context))?
                .is_none()
            {
                return Err(ContributionError::NotFound(context.to_string()));
            }
            let created = uow
                .create_resource(NewResourceRow {
                    name,
                    category: request.category,
                    suggested_quantity,
                    event_id: request.event_id,
                })
                .await
                .map_err(lift(&context))?;
            if request.initial_quantity == 0 {
                return Ok(created);
            }
            add_within(
                &mut *uow,
                &request.creator_email,
                request.event_id,
                created.identifier,
                request.initial_quantity,
            )
            .await?;
            require_resource(&mut *uow, created.identifier).await
        }
        .await;
        finish(uow, &context, result).await
    }

    /// Lists the event's resources, each with its contributors resolved to
    /// their e-mail addresses.
    pub async fn resources_with_contributors(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<ResourceWithContributors>, ContributionError> {
        let context = EventContext(event_id);
        let mut uow = self.begin(&context).await?;
        let result = async {
            let resources = uow
                .find_resources_by_event(event_id)
                .await
                .map_err(lift(&context))?;
            let mut emails: HashMap<Uuid, Option<String>> = HashMap::new();
            let mut listed = Vec::with_capacity(resources.len());
            for resource in resources {
                let contributions = uow
                    .find_contributions_by_resource(resource.identifier)
                    .await
                    .map_err(lift(&ResourceContext(resource.identifier)))?;
                let mut contributors = Vec::with_capacity(contributions.len());
                for contribution in contributions {
                    let email = match emails.get(&contribution.participant_id) {
                        Some(email) => email.clone(),
                        None => {
                            let email = uow
                                .find_participant_by_id(contribution.participant_id)
                                .await
                                .map_err(lift(&context))?
                                .map(|participant| participant.user_email);
                            emails.insert(contribution.participant_id, email.clone());
                            email
                        }
                    };
                    let Some(user_email) = email else {
                        continue;
                    };
                    contributors.push(ContributorInfo {
                        user_email,
                        quantity: contribution.quantity,
                        contributed_at: contribution.created_at,
                    });
                }
                listed.push(ResourceWithContributors {
                    resource,
                    contributors,
                });
            }
            Ok::<_, ContributionError>(listed)
        }
        .await;
        finish(uow, &context, result).await
    }

    async fn begin(
        &self,
        context: &(dyn Display + Sync),
    ) -> Result<Box<dyn UnitOfWork>, ContributionError> {
        self.stores.begin().await.map_err(lift(context))
    }
}

struct ResourceContext(Uuid);

impl Display for ResourceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "resource {}", self.0)
    }
}

struct EventContext(Uuid);

impl Display for EventContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event {}", self.0)
    }
}

fn lift<'a>(
    context: &'a (dyn Display + Sync),
) -> impl FnOnce(StoreError) -> ContributionError + 'a {
    move |err| ContributionError::from_store(context, err)
}

fn ensure_positive(quantity: i32) -> Result<(), ContributionError> {
    if quantity <= 0 {
        return Err(ContributionError::InvalidQuantity(quantity));
    }
    Ok(())
}

async fn finish<T>(
    uow: Box<dyn UnitOfWork>,
    context: &(dyn Display + Sync),
    result: Result<T, ContributionError>,
) -> Result<T, ContributionError> {
    match result {
        Ok(value) => {
            uow.commit().await.map_err(lift(context))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                warn!("rollback failed for {}: {}", context, rollback_err);
            }
            Err(err)
        }
    }
}

async fn require_resource(
    store: &mut dyn UnitOfWork,
    resource_id: Uuid,
) -> Result<Resource, ContributionError> {
    store
        .find_resource(resource_id)
        .await
        .map_err(lift(&ResourceContext(resource_id)))?
        .ok_or_else(|| ContributionError::NotFound(format!("resource {}", resource_id)))
}

async fn require_event_resource(
    store: &mut dyn UnitOfWork,
    event_id: Uuid,
    resource_id: Uuid,
) -> Result<Resource, ContributionError> {
    let resource = require_resource(store, resource_id).await?;
    if resource.event_id != event_id {
        return Err(ContributionError::NotFound(format!(
            "resource {} in event {}",
            resource_id, event_id
        )));
    }
    Ok(resource)
}

async fn add_within(
    store: &mut dyn UnitOfWork,
    user_email: &str,
    event_id: Uuid,
    resource_id: Uuid,
    quantity: i32,
) -> Result<Contribution, ContributionError> {
    let context = ResourceContext(resource_id);
    let resource = require_event_resource(store, event_id, resource_id).await?;
    resource
        .current_quantity
        .checked_add(quantity)
        .ok_or_else(|| quantity_overflow(resource_id))?;

    let participant = store
        .find_or_create_participant(user_email, event_id)
        .await
        .map_err(lift(&context))?;

    let existing = store
        .find_contribution(participant.identifier, resource_id)
        .await
        .map_err(lift(&context))?;
    let contribution = match existing {
        Some(existing) => {
            let total = existing
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| quantity_overflow(resource_id))?;
            store
                .update_contribution_quantity(participant.identifier, resource_id, total)
                .await
                .map_err(lift(&context))?
        }
        None => store
            .insert_contribution(participant.identifier, resource_id, quantity)
            .await
            .map_err(lift(&context))?,
    };

    let updated = store
        .apply_delta(resource_id, quantity, resource.version)
        .await
        .map_err(lift(&context))?;
    debug!(
        "contribution added: resource={} participant={} delta=+{} quantity={} version={}",
        resource_id, participant.identifier, quantity, updated.current_quantity, updated.version
    );
    Ok(contribution)
}

async fn reduce_within(
    store: &mut dyn UnitOfWork,
    user_email: &str,
    event_id: Uuid,
    resource_id: Uuid,
    quantity: i32,
) -> Result<Option<Contribution>, ContributionError> {
    let context = ResourceContext(resource_id);
    let participant = store
        .find_participant(user_email, event_id)
        .await
        .map_err(lift(&context))?
        .ok_or_else(|| {
            ContributionError::NotFound(format!("participant {} in event {}", user_email, event_id))
        })?;
    let contribution = store
        .find_contribution(participant.identifier, resource_id)
        .await
        .map_err(lift(&context))?
        .ok_or_else(|| {
            ContributionError::NotFound(format!(
                "contribution of {} on resource {}",
                user_email, resource_id
            ))
        })?;

    if quantity > contribution.quantity {
        return Err(ContributionError::InsufficientContribution {
            current: contribution.quantity,
            requested: quantity,
        });
    }

    let resource = require_resource(store, resource_id).await?;
    let remaining = contribution.quantity - quantity;
    let reduced = if remaining == 0 {
        store
            .delete_contribution(participant.identifier, resource_id)
            .await
            .map_err(lift(&context))?;
        None
    } else {
        Some(
            store
                .update_contribution_quantity(participant.identifier, resource_id, remaining)
                .await
                .map_err(lift(&context))?,
        )
    };

    let updated = store
        .apply_delta(resource_id, -quantity, resource.version)
        .await
        .map_err(lift(&context))?;
    debug!(
        "contribution reduced: resource={} participant={} delta=-{} quantity={} version={}",
        resource_id, participant.identifier, quantity, updated.current_quantity, updated.version
    );
    Ok(reduced)
}

async fn delete_within(
    store: &mut dyn UnitOfWork,
    user_email: &str,
    event_id: Uuid,
    resource_id: Uuid,
) -> Result<bool, ContributionError> {
    let context = ResourceContext(resource_id);
    let Some(participant) = store
        .find_participant(user_email, event_id)
        .await
        .map_err(lift(&context))?
    else {
        return Ok(false);
    };
    let Some(contribution) = store
        .find_contribution(participant.identifier, resource_id)
        .await
        .map_err(lift(&context))?
    else {
        return Ok(false);
    };

    let removed = store
        .delete_contribution(participant.identifier, resource_id)
        .await
        .map_err(lift(&context))?;
    if !removed {
        return Ok(false);
    }

    let Some(resource) = store.find_resource(resource_id).await.map_err(lift(&context))? else {
        debug!("resource {} already gone, nothing to adjust", resource_id);
        return Ok(true);
    };
    let updated = store
        .apply_delta(resource_id, -contribution.quantity, resource.version)
        .await
        .map_err(lift(&context))?;
    debug!(
        "contribution deleted: resource={} participant={} delta=-{} quantity={} version={}",
        resource_id,
        participant.identifier,
        contribution.quantity,
        updated.current_quantity,
        updated.version
    );
    Ok(true)
}

fn quantity_overflow(resource_id: Uuid) -> ContributionError {
    ContributionError::InvalidInput(format!("quantity overflow on resource {}", resource_id))
}
