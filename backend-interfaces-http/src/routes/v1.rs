use axum::routing::{get, post, put};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{
    contribution_handlers, event_handlers, ops_handlers, participant_handlers, resource_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/events",
            post(event_handlers::create_event).get(event_handlers::list_my_events),
        )
        .route(
            "/v1/events/:event_id",
            put(event_handlers::update_event).delete(event_handlers::delete_event),
        )
        .route(
            "/v1/events/:event_id/resources",
            post(resource_handlers::create_resource).get(resource_handlers::list_resources),
        )
        .route(
            "/v1/events/:event_id/resources/:resource_id/contributions",
            get(contribution_handlers::list_contributions)
                .post(contribution_handlers::add_contribution)
                .delete(contribution_handlers::delete_contribution),
        )
        .route(
            "/v1/events/:event_id/resources/:resource_id/contributions/reduce",
            post(contribution_handlers::reduce_contribution),
        )
        .route(
            "/v1/events/:event_id/participants",
            post(participant_handlers::create_participant)
                .get(participant_handlers::list_participants),
        )
        .route(
            "/v1/events/:event_id/participants/me",
            put(participant_handlers::update_my_status),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
