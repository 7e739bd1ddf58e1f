//! Service binary for the `FluxFlix` movie catalog.
//!
//! Wires the configured store into the catalog, optionally seeds demo
//! data, and serves the HTTP API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize structured logging (tracing)
//! 3. Connect the configured store backend
//! 4. Seed demo titles (unless `SEED_DEMO_DATA=false`)
//! 5. Serve HTTP until a shutdown signal arrives

mod error;

use std::sync::Arc;

use fluxflix_api::{AppState, ServerConfig};
use fluxflix_core::{DEMO_TITLES, LogFormat, MovieCatalog, ServiceConfig, StoreBackend};
use fluxflix_db::{DragonflyMovieStore, InMemoryMovieStore, MovieStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServiceError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, store connection, seeding, or the
/// server itself fails.
#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    // 1. Load configuration.
    let config = ServiceConfig::from_env()?;

    // 2. Initialize structured logging.
    init_tracing(config.log_format)?;
    info!(
        host = config.host,
        port = config.port,
        store_backend = ?config.store_backend,
        event_interval_ms = config.event_interval.as_millis(),
        seed_demo_data = config.seed_demo_data,
        "fluxflix-service starting"
    );

    // 3-5. Connect the store and serve.
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory movie store");
            run(&config, InMemoryMovieStore::new()).await
        }
        StoreBackend::Dragonfly => {
            info!(url = config.dragonfly_url, "Connecting to Dragonfly");
            let store = DragonflyMovieStore::connect(&config.dragonfly_url).await?;
            let result = run(&config, store.clone()).await;
            store.close().await;
            result
        }
    }
}

/// Seed (if enabled) and serve the catalog backed by `store`.
async fn run<S: MovieStore>(config: &ServiceConfig, store: S) -> Result<(), ServiceError> {
    if config.seed_demo_data {
        fluxflix_core::seed_demo_data(&store, &DEMO_TITLES).await?;
    }

    let catalog = MovieCatalog::new(store, config.event_stream());
    let state = Arc::new(AppState::new(catalog));
    let server_config = ServerConfig {
        host: config.host.clone(),
        port: config.port,
    };

    fluxflix_api::start_server(&server_config, state, shutdown_signal()).await?;
    info!("fluxflix-service stopped");
    Ok(())
}

/// Install the global tracing subscriber.
fn init_tracing(format: LogFormat) -> Result<(), ServiceError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| ServiceError::Logging {
        message: e.to_string(),
    })
}

/// Resolve when the process receives `Ctrl-C`.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
