//! Catalog records and synthetic viewing events.
//!
//! [`Movie`] is the only persisted entity. [`MovieEvent`] is a transient
//! value that exists only as an element of an event stream and is never
//! written to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::MovieId;

/// A title was empty or contained only whitespace.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("movie title must not be blank")]
pub struct InvalidTitle;

/// A movie that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    title: String,
}

impl NewMovie {
    /// Create an unsaved movie with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTitle`] if the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, InvalidTitle> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(InvalidTitle);
        }
        Ok(Self { title })
    }

    /// The movie title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Attach a store-assigned id, producing the persisted record.
    pub fn with_id(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
        }
    }
}

/// A stored catalog record.
///
/// Serializes as `{"id": string, "title": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Identifier assigned by the store on creation.
    pub id: MovieId,
    /// Display title (never blank).
    pub title: String,
}

/// One synthetic observation of a movie being viewed.
///
/// Serializes as `{"movieId": string, "dateViewed": timestamp}`. The
/// `movie_id` is whatever the stream was requested for; it is not checked
/// against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEvent {
    /// Movie the event refers to.
    pub movie_id: MovieId,
    /// Wall-clock time at which the event was produced.
    pub date_viewed: DateTime<Utc>,
}

impl MovieEvent {
    /// Build an event for `movie_id` stamped with the current time.
    pub fn now(movie_id: MovieId) -> Self {
        Self {
            movie_id,
            date_viewed: Utc::now(),
        }
    }
}
