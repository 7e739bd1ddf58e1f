//! HTTP API for the `FluxFlix` movie catalog.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for reading the catalog (`/movies`, `/movies/{id}`)
//! - **Server-sent event endpoint** (`/movies/{id}/events`) streaming one
//!   synthetic viewing event per tick until the client disconnects
//! - **Health check** (`/health`)
//!
//! # Architecture
//!
//! Handlers are thin: each one calls a single [`MovieCatalog`] operation
//! and serializes the result. The store type is a generic parameter so the
//! same router serves the in-memory and `Dragonfly` backends.
//!
//! [`MovieCatalog`]: fluxflix_core::MovieCatalog

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod sse;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, start_server};
pub use state::AppState;
