//! The location ledger: validated, append-only ingestion.
//!
//! The ledger checks coordinate ranges, rounds to six fractional digits,
//! and hands exactly one row to the store. It never checks whether the
//! entity exists (the calling layer owns that) and never retries a failed
//! write.

use dockify_types::{Coordinate, EntityId, ObservationId};

use crate::error::ProximityError;
use crate::store::ObservationStore;

/// Append-only ingestion over a borrowed store.
#[derive(Debug)]
pub struct LocationLedger<'a, S> {
    store: &'a S,
}

impl<S> Clone for LocationLedger<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for LocationLedger<'_, S> {}

impl<'a, S: ObservationStore> LocationLedger<'a, S> {
    /// Create a ledger bound to a store owned elsewhere.
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validate and append one observation.
    ///
    /// # Errors
    ///
    /// Returns [`ProximityError::InvalidCoordinate`] before touching the
    /// store if either component is non-finite or out of range, and
    /// [`ProximityError::StoreUnavailable`] if the write fails.
    pub async fn append(
        &self,
        entity_id: EntityId,
        latitude: f64,
        longitude: f64,
    ) -> Result<ObservationId, ProximityError> {
        let coordinate = Coordinate::from_degrees(latitude, longitude)?;

        let id = self.store.append(entity_id, coordinate).await.map_err(|e| {
            tracing::warn!(entity_id = %entity_id, error = %e, "Observation append failed");
            ProximityError::StoreUnavailable(e)
        })?;

        tracing::debug!(
            observation_id = %id,
            entity_id = %entity_id,
            latitude = %coordinate.latitude(),
            longitude = %coordinate.longitude(),
            "Observation appended"
        );
        Ok(id)
    }
}
