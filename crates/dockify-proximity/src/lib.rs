//! Location ledger and nearest-neighbour query engine.
//!
//! This crate holds the only logic in the service with non-trivial
//! semantics: spherical distance math, per-entity selection, and
//! deterministic ranking. It is storage-agnostic; concrete stores plug in
//! through [`ObservationStore`].
//!
//! # Architecture
//!
//! ```text
//! Ingest ---> LocationLedger --append--> ObservationStore
//!                                           ^
//! Query  ---> ProximityEngine ---scan-------+
//!                 |
//!                 +-- haversine distance, selection policy, ranking
//! ```
//!
//! Ledger and engine borrow the store; its lifetime belongs to the process
//! wiring. Neither holds mutable state, so any number of appends and
//! queries may run concurrently.
//!
//! # Modules
//!
//! - [`ledger`] -- Validated append-only ingestion
//! - [`engine`] -- Radius queries and the selection algorithm
//! - [`haversine`] -- Great-circle distance
//! - [`window`] -- Index-friendly scan bounds
//! - [`store`] -- The storage trait
//! - [`memory`] -- In-memory store
//! - [`error`] -- Error taxonomy

pub mod engine;
pub mod error;
pub mod haversine;
pub mod ledger;
pub mod memory;
pub mod store;
pub mod window;

#[cfg(test)]
mod testing;

// Re-export primary types for convenience.
pub use engine::{EngineConfig, ProximityEngine, select_nearby};
pub use error::{ProximityError, StoreError};
pub use haversine::{EARTH_RADIUS_METERS, haversine_meters};
pub use ledger::LocationLedger;
pub use memory::MemoryStore;
pub use store::ObservationStore;
pub use window::ScanWindow;
