use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::AppState;
use backend_infrastructure::{AppConfig, DefaultHealthService, SqliteStore};

pub struct AppContext {
    pub state: AppState,
    pub store: Arc<SqliteStore>,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let db_config = config.to_db_config();
        let store = SqliteStore::open(&db_config.database_path).await?;
        info!("database ready at {}", db_config.database_path);
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: &AppConfig, store: SqliteStore) -> Self {
        let store = Arc::new(store);
        let state = AppState::new(
            config.to_runtime_config(),
            store.clone(),
            Arc::new(DefaultHealthService::new(store.clone())),
        );
        Self { state, store }
    }
}
