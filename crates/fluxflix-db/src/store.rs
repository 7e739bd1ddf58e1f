//! The [`MovieStore`] trait.
//!
//! Only the operations the catalog actually needs are modelled here; there
//! is no generic repository over arbitrary entities. Every method returns a
//! `Send` future so stores can be used from axum handlers and spawned
//! tasks.

use std::future::Future;

use fluxflix_types::{Movie, MovieId, NewMovie};

use crate::error::DbError;

/// Persistence operations over the movie collection.
///
/// Implementations are cheap to clone (a shared handle to the backing
/// store). Ordering of multi-record results is store-defined; both
/// provided backends return records in insertion order.
pub trait MovieStore: Clone + Send + Sync + 'static {
    /// Persist a new movie, assigning it a fresh id.
    fn create(&self, movie: NewMovie) -> impl Future<Output = Result<Movie, DbError>> + Send;

    /// Remove every movie from the store.
    fn delete_all(&self) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Return every stored movie.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Movie>, DbError>> + Send;

    /// Look up a movie by id. Unknown ids resolve to `Ok(None)`.
    fn find_by_id(
        &self,
        id: &MovieId,
    ) -> impl Future<Output = Result<Option<Movie>, DbError>> + Send;

    /// Return every movie whose title matches `title` exactly.
    fn find_by_title(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<Movie>, DbError>> + Send;
}
