//! Payee API server
//!
//! Configuration comes from the YAML file named by `RECEBEDORES_CONFIG`
//! plus environment overrides; see [`recebedores::config`].

use anyhow::Result;
use recebedores::config::{AppConfig, LogFormat, LoggingConfig};
use recebedores::server::ServerBuilder;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber; `RUST_LOG` wins over the configured filter
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);

    tracing::info!(
        unique_keys = config.policy.unique_keys,
        "Starting recebedores v{}",
        env!("CARGO_PKG_VERSION")
    );

    ServerBuilder::from_config(&config)
        .await?
        .serve(config.server.bind_addr())
        .await
}
