//! The movie catalog service.
//!
//! [`MovieCatalog`] wraps a [`MovieStore`] and exposes the three read
//! operations served over HTTP. Catalog reads are pass-through: store
//! failures reach the caller unchanged and a missing record is `Ok(None)`,
//! never an error.

use fluxflix_db::{DbError, MovieStore};
use fluxflix_types::{Movie, MovieId};

use crate::events::{EventStream, EventStreamConfig};

/// Read access to the catalog plus synthetic viewing-event streams.
#[derive(Debug, Clone)]
pub struct MovieCatalog<S> {
    store: S,
    events: EventStreamConfig,
}

impl<S: MovieStore> MovieCatalog<S> {
    /// Create a catalog over `store`, emitting events at the cadence in
    /// `events`.
    pub const fn new(store: S, events: EventStreamConfig) -> Self {
        Self { store, events }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// All stored movies, in store-defined order.
    pub async fn list_movies(&self) -> Result<Vec<Movie>, DbError> {
        self.store.find_all().await
    }

    /// The movie with the given id, or `None` if there is no such record.
    pub async fn get_movie(&self, id: &MovieId) -> Result<Option<Movie>, DbError> {
        self.store.find_by_id(id).await
    }

    /// Start an unbounded stream of viewing events for `movie_id`.
    ///
    /// The id is not checked against the catalog. Must be called from
    /// within a Tokio runtime.
    pub fn stream_events(&self, movie_id: MovieId) -> EventStream {
        EventStream::spawn(movie_id, self.events)
    }
}
