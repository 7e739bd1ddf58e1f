//! Error types for the store layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`fred`] and [`serde_json`] errors. Callers above the store never
//! translate these; they pass through to the HTTP layer unchanged.

/// Errors that can occur in the store layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A stored document could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record was rejected before it reached the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<fluxflix_types::InvalidTitle> for DbError {
    fn from(e: fluxflix_types::InvalidTitle) -> Self {
        Self::Validation(e.to_string())
    }
}
