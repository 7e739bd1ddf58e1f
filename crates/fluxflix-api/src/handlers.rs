//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/movies` | List all movies |
//! | `GET` | `/movies/{id}` | Get a single movie (404 if absent) |
//!
//! The event stream endpoint lives in [`crate::sse`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use fluxflix_db::MovieStore;
use fluxflix_types::{Movie, MovieId};

use crate::error::ApiError;
use crate::state::AppState;

/// Report that the server is up.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// List every movie in the catalog, in store order.
pub async fn list_movies<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.catalog.list_movies().await?;
    tracing::debug!(count = movies.len(), "Listed movies");
    Ok(Json(movies))
}

/// Fetch a single movie by id.
///
/// Unknown ids (including ones that are not UUIDs) return 404.
pub async fn get_movie<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = MovieId::from(id);
    state
        .catalog
        .get_movie(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("movie {id}")))
}
