//! Document store layer for the `FluxFlix` movie catalog.
//!
//! The catalog persists a single collection of [`Movie`] documents. This
//! crate defines the small set of operations the service needs
//! ([`MovieStore`]) and two backends:
//!
//! ```text
//! MovieCatalog
//!     |
//!     +-- MovieStore (trait)
//!         |-- InMemoryMovieStore   (tests, local development)
//!         +-- DragonflyMovieStore  (JSON documents in Dragonfly/Redis)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`MovieStore`] trait
//! - [`memory`] -- In-process backend
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) backend
//! - [`error`] -- Shared error types
//!
//! [`Movie`]: fluxflix_types::Movie

pub mod dragonfly;
pub mod error;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use dragonfly::DragonflyMovieStore;
pub use error::DbError;
pub use memory::InMemoryMovieStore;
pub use store::MovieStore;
