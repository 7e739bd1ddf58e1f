//! Shared application state for the API server.

use fluxflix_core::MovieCatalog;
use fluxflix_db::MovieStore;
use tokio_util::sync::CancellationToken;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// The catalog every handler reads from.
    pub catalog: MovieCatalog<S>,
    /// Cancelled when the server begins shutting down. Open event streams
    /// end when it fires so graceful shutdown can complete.
    pub shutdown: CancellationToken,
}

impl<S: MovieStore> AppState<S> {
    /// Create application state around a catalog.
    pub fn new(catalog: MovieCatalog<S>) -> Self {
        Self {
            catalog,
            shutdown: CancellationToken::new(),
        }
    }
}
