//! In-process [`MovieStore`] backend.
//!
//! Keeps every record in a vector behind a shared [`RwLock`], so clones of
//! the store see the same collection. Used by tests and by the service when
//! `STORE_BACKEND=memory`.

use std::sync::Arc;

use fluxflix_types::{Movie, MovieId, NewMovie};
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::store::MovieStore;

/// A movie store held entirely in memory.
///
/// Records are kept in insertion order. Lookups are linear, which is fine
/// for a catalog of demo size.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl InMemoryMovieStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored movies.
    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    /// Whether the store holds no movies.
    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}

impl MovieStore for InMemoryMovieStore {
    async fn create(&self, movie: NewMovie) -> Result<Movie, DbError> {
        let movie = movie.with_id(MovieId::generate());
        self.movies.write().await.push(movie.clone());
        tracing::trace!(movie_id = %movie.id, "Movie stored in memory");
        Ok(movie)
    }

    async fn delete_all(&self) -> Result<(), DbError> {
        self.movies.write().await.clear();
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, DbError> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DbError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|m| &m.id == id)
            .cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Movie>, DbError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| m.title == title)
            .cloned()
            .collect())
    }
}
