//! `Dragonfly` (Redis-compatible) [`MovieStore`] backend.
//!
//! Each movie is stored as a JSON document under its own key. Insertion
//! order is kept in a separate list so `find_all` can return records in a
//! stable order without scanning the keyspace.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `{ns}:movie:{id}` | JSON | Full movie document |
//! | `{ns}:movies:index` | List | Movie ids in insertion order |
//!
//! `{ns}` defaults to [`DEFAULT_NAMESPACE`].

use std::sync::Arc;

use fluxflix_types::{Movie, MovieId, NewMovie};
use fred::prelude::*;

use crate::error::DbError;
use crate::store::MovieStore;

/// Key namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "fluxflix";

/// Connection handle to a `Dragonfly` instance holding the movie collection.
///
/// Wraps a [`fred::prelude::Client`]; clones share the same connection.
#[derive(Clone)]
pub struct DragonflyMovieStore {
    client: Client,
    namespace: Arc<str>,
}

impl DragonflyMovieStore {
    /// Connect to `Dragonfly` at the given URL.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Dragonfly`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let config = Config::from_url(url)
            .map_err(|e| DbError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Dragonfly");
        Ok(Self {
            client,
            namespace: Arc::from(DEFAULT_NAMESPACE),
        })
    }

    /// Use a different key namespace (e.g. to isolate test runs).
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Arc::from(namespace);
        self
    }

    /// Close the connection gracefully.
    pub async fn close(&self) {
        if let Err(e) = self.client.quit().await {
            tracing::warn!(error = %e, "Dragonfly quit failed");
        }
        tracing::info!("Dragonfly connection closed");
    }

    fn movie_key(&self, id: &MovieId) -> String {
        format!("{}:movie:{id}", self.namespace)
    }

    fn index_key(&self) -> String {
        format!("{}:movies:index", self.namespace)
    }

    async fn indexed_ids(&self) -> Result<Vec<String>, DbError> {
        let ids: Vec<String> = self.client.lrange(self.index_key(), 0, -1).await?;
        Ok(ids)
    }

    /// Fetch the documents for `ids` in order, skipping ids whose document
    /// has disappeared.
    async fn load_many(&self, ids: Vec<String>) -> Result<Vec<Movie>, DbError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids
            .into_iter()
            .map(|id| self.movie_key(&MovieId::from(id)))
            .collect();
        let documents: Vec<Option<String>> = self.client.mget(keys).await?;

        let mut movies = Vec::with_capacity(documents.len());
        for document in documents {
            match document {
                Some(json) => movies.push(serde_json::from_str(&json)?),
                None => tracing::warn!("Indexed movie document missing, skipping"),
            }
        }
        Ok(movies)
    }
}

impl MovieStore for DragonflyMovieStore {
    async fn create(&self, movie: NewMovie) -> Result<Movie, DbError> {
        let movie = movie.with_id(MovieId::generate());
        let json = serde_json::to_string(&movie)?;

        let _: () = self
            .client
            .set(self.movie_key(&movie.id), json.as_str(), None, None, false)
            .await?;
        let _: i64 = self
            .client
            .rpush(self.index_key(), movie.id.as_str())
            .await?;

        tracing::debug!(movie_id = %movie.id, "Movie stored in Dragonfly");
        Ok(movie)
    }

    async fn delete_all(&self) -> Result<(), DbError> {
        let mut keys: Vec<String> = self
            .indexed_ids()
            .await?
            .into_iter()
            .map(|id| self.movie_key(&MovieId::from(id)))
            .collect();
        keys.push(self.index_key());

        let removed: i64 = self.client.del(keys).await?;
        tracing::debug!(removed, "Movie collection cleared");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Movie>, DbError> {
        let ids = self.indexed_ids().await?;
        self.load_many(ids).await
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, DbError> {
        let value: Option<String> = self.client.get(self.movie_key(id)).await?;
        value
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(DbError::from)
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Movie>, DbError> {
        let mut movies = self.find_all().await?;
        movies.retain(|m| m.title == title);
        Ok(movies)
    }
}
