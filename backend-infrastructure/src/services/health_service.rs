use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::{HealthCheckService, UnitOfWorkFactory};

pub struct DefaultHealthService {
    stores: Arc<dyn UnitOfWorkFactory>,
}

impl DefaultHealthService {
    pub fn new(stores: Arc<dyn UnitOfWorkFactory>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.stores.ping().await.map(|_| true).map_err(anyhow::Error::from)
    }
}
