use anyhow::Result;
use tracing::info;
use webstatus::{config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("webstatus=info".parse()?),
        )
        .init();

    info!("Starting Web Status dashboard");

    let config = Config::from_env()?;
    info!(
        "Serving status from {} (sources: {})",
        config.webstatus_file.display(),
        config.sources_file.display()
    );

    server::serve(config).await
}
