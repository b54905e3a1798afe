//! ServerBuilder for fluent API to build HTTP servers

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};

use super::router::build_router;
use crate::config::{AppConfig, DatabaseConfig};
use crate::core::{PayeeService, PayeeStore, PolicyConfig};
use crate::storage::InMemoryPayeeStore;

/// Builder for the payee HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryPayeeStore::new())
///     .with_policy(PolicyConfig { unique_keys: false })
///     .serve("127.0.0.1:8080")
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn PayeeStore>>,
    policy: PolicyConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            policy: PolicyConfig::default(),
        }
    }

    /// Builder populated from loaded configuration
    ///
    /// Connects to PostgreSQL when a database URL is configured and the
    /// `postgres` feature is enabled; otherwise keeps payees in memory.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = connect_store(&config.database).await?;
        Ok(Self::new()
            .with_shared_store(store)
            .with_policy(config.policy))
    }

    /// Set the payee store (defaults to an empty in-memory store)
    pub fn with_store(self, store: impl PayeeStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    pub fn with_shared_store(mut self, store: Arc<dyn PayeeStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Build the service the routes delegate to
    pub fn build_service(self) -> PayeeService {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryPayeeStore::new()));
        PayeeService::new(store, self.policy)
    }

    /// Build the final REST router
    pub fn build(self) -> Router {
        build_router(self.build_service())
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address (host names are resolved)
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: impl ToSocketAddrs) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "postgres")]
async fn connect_store(database: &DatabaseConfig) -> Result<Arc<dyn PayeeStore>> {
    use crate::storage::PostgresPayeeStore;
    use crate::storage::postgres::ensure_schema;
    use sqlx::postgres::PgPoolOptions;

    let Some(url) = database.url.as_deref() else {
        tracing::info!("No database configured, using in-memory store");
        return Ok(Arc::new(InMemoryPayeeStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(url)
        .await?;
    ensure_schema(&pool).await?;

    tracing::info!(
        max_connections = database.max_connections,
        "Using PostgreSQL store"
    );
    Ok(Arc::new(PostgresPayeeStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn connect_store(database: &DatabaseConfig) -> Result<Arc<dyn PayeeStore>> {
    if database.url.is_some() {
        tracing::warn!(
            "database.url is set but the postgres feature is disabled, using in-memory store"
        );
    }
    Ok(Arc::new(InMemoryPayeeStore::new()))
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
