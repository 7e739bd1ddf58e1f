//! Core service logic for the `FluxFlix` movie catalog.
//!
//! - [`catalog`] -- [`MovieCatalog`], read access to the store plus the
//!   per-movie viewing-event stream
//! - [`events`] -- The timer-driven [`EventStream`] producer
//! - [`seed`] -- Demo data seeding at startup
//! - [`config`] -- Service configuration loaded from the environment

pub mod catalog;
pub mod config;
pub mod events;
pub mod seed;

pub use catalog::MovieCatalog;
pub use config::{ConfigError, LogFormat, ServiceConfig, StoreBackend};
pub use events::{EventStream, EventStreamConfig};
pub use seed::{DEMO_TITLES, seed_demo_data};
