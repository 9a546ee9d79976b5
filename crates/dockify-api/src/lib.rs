//! HTTP API for the Dockify proximity service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Ingestion** (`POST /api/v1/location`) appending one observation
//!   through the [`LocationLedger`](dockify_proximity::LocationLedger)
//! - **Radius query** (`POST /api/v1/location/nearest`) answered by the
//!   [`ProximityEngine`](dockify_proximity::ProximityEngine)
//! - **Health** (`GET /health`)
//!
//! # Architecture
//!
//! Handlers, router, and server are generic over the
//! [`ObservationStore`](dockify_proximity::ObservationStore) held in
//! [`AppState`]. Integration tests drive the router with the in-memory
//! store; the binary plugs in the `PostgreSQL` store.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
