//! HTTP server lifecycle management.
//!
//! Provides [`start_server`] which binds to a TCP port and runs the Axum
//! server until the supplied shutdown future resolves, and [`serve`] for
//! callers that bind the listener themselves.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use fluxflix_db::MovieStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Parse the configured host and port into a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address is not valid.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ServerError::Bind(format!("invalid address: {e}")))
    }
}

/// Start the HTTP server.
///
/// Binds to the configured address and hands the listener to [`serve`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind or the server
/// encounters a fatal I/O error.
pub async fn start_server<S, F>(
    config: &ServerConfig,
    state: Arc<AppState<S>>,
    shutdown: F,
) -> Result<(), ServerError>
where
    S: MovieStore,
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;

    serve(listener, state, shutdown).await
}

/// Serve the catalog router on an already-bound listener.
///
/// When `shutdown` resolves, the state's shutdown token is cancelled so
/// open event streams end, then in-flight requests are allowed to finish.
///
/// # Errors
///
/// Returns an error if the server encounters a fatal I/O error.
pub async fn serve<S, F>(
    listener: TcpListener,
    state: Arc<AppState<S>>,
    shutdown: F,
) -> Result<(), ServerError>
where
    S: MovieStore,
    F: Future<Output = ()> + Send + 'static,
{
    let token = state.shutdown.clone();
    let router = build_router(state);

    match listener.local_addr() {
        Ok(addr) => info!(%addr, "Catalog server listening"),
        Err(e) => warn!(error = %e, "Catalog server listening on unknown address"),
    }

    let signal = async move {
        shutdown.await;
        token.cancel();
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .await
        .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

    info!("Catalog server stopped");
    Ok(())
}

/// Errors that can occur when starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
