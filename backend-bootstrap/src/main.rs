use anyhow::Result;
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use backend_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "happyrow-backend")]
#[command(about = "HappyRow Backend Server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("HAPPYROW_CONFIG", config);
    }

    // Peek at the config before logging is up so log_dir can take effect;
    // the real load below reports any problems through tracing.
    let log_dir = AppConfig::load().await.ok().and_then(|config| config.log_dir);
    let (file_layer, _guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "happyrow-backend.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(file_layer)
        .init();

    let config = AppConfig::load().await?;
    backend_bootstrap::run_standalone(config).await
}
