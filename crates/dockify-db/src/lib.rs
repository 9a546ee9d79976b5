//! `PostgreSQL` data layer for the Dockify proximity service.
//!
//! Provides the durable [`ObservationStore`](dockify_proximity::ObservationStore)
//! used in production. The schema lives in `migrations/` and is embedded
//! into the binary with [`sqlx::migrate!`].
//!
//! # Architecture
//!
//! ```text
//! LocationLedger / ProximityEngine
//!     |
//!     +-- ObservationStore --> LocationStore --> PostgresPool --> locations
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`location_store`] -- Observation inserts and windowed scans
//! - [`error`] -- Shared error types

pub mod error;
pub mod location_store;
pub mod postgres;

// Re-export primary types for convenience.
pub use error::DbError;
pub use location_store::{LocationRow, LocationStore};
pub use postgres::{PostgresConfig, PostgresPool};
