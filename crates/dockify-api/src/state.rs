//! Shared application state for the API server.
//!
//! [`AppState`] owns the observation store behind an [`Arc`] and hands out
//! short-lived [`LocationLedger`] and [`ProximityEngine`] views that borrow
//! it per request.

use std::sync::Arc;

use dockify_proximity::{EngineConfig, LocationLedger, ObservationStore, ProximityEngine};

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState<S> {
    /// The observation store all requests read from and append to.
    pub store: Arc<S>,
    /// Query engine settings.
    pub engine_config: EngineConfig,
}

impl<S: ObservationStore> AppState<S> {
    /// Create application state around an existing store.
    pub const fn new(store: Arc<S>, engine_config: EngineConfig) -> Self {
        Self {
            store,
            engine_config,
        }
    }

    /// Ingestion view over the store.
    pub fn ledger(&self) -> LocationLedger<'_, S> {
        LocationLedger::new(self.store.as_ref())
    }

    /// Query view over the store.
    pub fn engine(&self) -> ProximityEngine<'_, S> {
        ProximityEngine::new(self.store.as_ref(), self.engine_config)
    }
}
