pub mod context;
pub mod lifecycle;

pub use context::AppContext;
pub use lifecycle::{build_router_with_layers, run_standalone};

pub async fn run() -> anyhow::Result<()> {
    let config = backend_infrastructure::AppConfig::load().await?;
    run_standalone(config).await
}
