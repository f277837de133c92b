use std::sync::Arc;

use backend_domain::ports::{HealthCheckService, UnitOfWorkFactory};
use backend_domain::services::ContributionEngine;
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub engine: Arc<ContributionEngine>,
    pub stores: Arc<dyn UnitOfWorkFactory>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(
        config: RuntimeConfig,
        stores: Arc<dyn UnitOfWorkFactory>,
        health_service: Arc<dyn HealthCheckService>,
    ) -> Self {
        Self {
            config,
            engine: Arc::new(ContributionEngine::new(stores.clone())),
            stores,
            health_service,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
