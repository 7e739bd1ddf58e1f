//! Axum router construction for the catalog API.
//!
//! Assembles all routes (REST + SSE) into a single [`Router`] with CORS
//! and request tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use fluxflix_db::MovieStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::sse;
use crate::state::AppState;

/// Build the complete Axum router for the catalog service.
///
/// The router includes:
/// - `GET /health` -- liveness check
/// - `GET /movies` -- list movies
/// - `GET /movies/{id}` -- single movie
/// - `GET /movies/{id}/events` -- server-sent viewing events
///
/// CORS allows any origin so browser dashboards can subscribe to the
/// event stream directly.
pub fn build_router<S: MovieStore>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/movies", get(handlers::list_movies::<S>))
        .route("/movies/{id}", get(handlers::get_movie::<S>))
        .route("/movies/{id}/events", get(sse::movie_events::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
