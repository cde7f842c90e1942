use std::sync::Arc;

use clap::Parser;

use ab_exporter::api::{ApiServer, ApiServerConfig, AppState};
use ab_exporter::cli::Args;
use ab_exporter::config::ExporterConfig;
use ab_exporter::logging::{LoggingOptions, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Args::parse().apply(ExporterConfig::from_env_or_default());
    config.validate()?;

    let _log_guard = init_logging(&LoggingOptions::from(&config))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        "Starting ab-exporter"
    );

    let registry = match ab_exporter::build_registry(&config).await {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(Arc::new(registry));
    let server = ApiServer::with_state(ApiServerConfig::from(&config), state);

    let cancel_token = server.cancel_token();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_token.cancel();
    });

    server.run().await?;

    tracing::info!("ab-exporter stopped");
    Ok(())
}
