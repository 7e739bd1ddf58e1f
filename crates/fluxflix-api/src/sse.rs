//! Server-sent event handler for per-movie viewing events.
//!
//! Clients connect to `GET /movies/{id}/events` and receive one
//! `movie-event` frame carrying a JSON [`MovieEvent`] per tick. The stream
//! has no natural end. It closes when the client disconnects (Axum drops
//! the response body, which drops the underlying [`EventStream`] and stops
//! its producer) or when the server's shutdown token is cancelled.
//!
//! [`MovieEvent`]: fluxflix_types::MovieEvent
//! [`EventStream`]: fluxflix_core::EventStream

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use fluxflix_db::MovieStore;
use fluxflix_types::MovieId;
use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use crate::state::AppState;

/// SSE event name used for every viewing event frame.
pub const MOVIE_EVENT_NAME: &str = "movie-event";

/// Logs the end of an SSE response when the body is dropped.
struct ClosedLog {
    movie_id: MovieId,
}

impl Drop for ClosedLog {
    fn drop(&mut self) {
        debug!(movie_id = %self.movie_id, "SSE client disconnected");
    }
}

/// Stream viewing events for a movie.
///
/// The id is not checked against the catalog.
///
/// # Route
///
/// `GET /movies/{id}/events`
pub async fn movie_events<S: MovieStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let movie_id = MovieId::from(id);
    debug!(%movie_id, "SSE client connected");

    let closed = ClosedLog {
        movie_id: movie_id.clone(),
    };
    let events = state
        .catalog
        .stream_events(movie_id)
        .take_until(state.shutdown.clone().cancelled_owned())
        .map(move |event| {
            trace!(movie_id = %closed.movie_id, "SSE frame");
            Event::default().event(MOVIE_EVENT_NAME).json_data(&event)
        });

    Sse::new(events).keep_alive(KeepAlive::default())
}
