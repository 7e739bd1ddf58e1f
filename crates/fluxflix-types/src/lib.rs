//! Shared type definitions for the `FluxFlix` movie catalog.
//!
//! This crate is the single source of truth for the values that flow
//! between the store, the catalog service, and the HTTP layer.
//!
//! # Modules
//!
//! - [`ids`] -- Opaque movie identifier
//! - [`movie`] -- Catalog records and synthetic viewing events

pub mod ids;
pub mod movie;

// Re-export all public types at crate root for convenience.
pub use ids::MovieId;
pub use movie::{InvalidTitle, Movie, MovieEvent, NewMovie};
