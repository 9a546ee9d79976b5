//! Dockify proximity service binary.
//!
//! Wires configuration, logging, storage, and the HTTP API together and
//! serves until `SIGINT`/`SIGTERM`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `dockify-config.yaml` (or `DOCKIFY_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Connect to `PostgreSQL` and run migrations, or fall back to the
//!    in-memory store when no database is configured
//! 4. Serve the HTTP API until a shutdown signal
//! 5. Close the connection pool

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use dockify_api::{AppState, ServerConfig, start_server};
use dockify_db::{LocationStore, PostgresPool};
use dockify_proximity::{EngineConfig, MemoryStore, ObservationStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig, ServiceConfig};
use crate::error::StartupError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, database start-up, or the server
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("dockify-server starting");
    info!(
        path = %config_path.display(),
        host = config.server.host,
        port = config.server.port,
        policy = ?config.engine.selection_policy,
        database = config.database.is_some(),
        "Configuration loaded"
    );

    // 3-5. Storage, serve, teardown.
    run(config).await?;

    info!("dockify-server stopped");
    Ok(())
}

async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    if let Some(database) = &config.database {
        let pool = PostgresPool::connect(database).await?;
        let store = LocationStore::new(pool.pool());
        let served = serve(&config.server, config.engine, store).await;
        pool.close().await;
        served
    } else {
        warn!("No database configured; observations are kept in memory and lost on exit");
        serve(&config.server, config.engine, MemoryStore::new()).await
    }
}

async fn serve<S: ObservationStore + 'static>(
    server: &ServerConfig,
    engine: EngineConfig,
    store: S,
) -> Result<(), StartupError> {
    let state = Arc::new(AppState::new(Arc::new(store), engine));
    start_server(server, state).await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}

/// Load configuration from the config file, or defaults when it is absent.
fn load_config() -> Result<(ServiceConfig, PathBuf), StartupError> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    let config = if path.exists() {
        ServiceConfig::from_file(&path)?
    } else {
        ServiceConfig::from_env()?
    };
    Ok((config, path))
}
