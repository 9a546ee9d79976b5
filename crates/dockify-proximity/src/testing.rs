//! Store doubles shared by the unit tests.

use dockify_types::{Coordinate, EntityId, LocationObservation, ObservationId};

use crate::error::StoreError;
use crate::store::ObservationStore;
use crate::window::ScanWindow;

/// A store whose every operation fails, as if the database were down.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl ObservationStore for FailingStore {
    async fn append(
        &self,
        _entity_id: EntityId,
        _coordinate: Coordinate,
    ) -> Result<ObservationId, StoreError> {
        Err(StoreError::Connection("connection refused".to_owned()))
    }

    async fn scan(&self, _window: ScanWindow) -> Result<Vec<LocationObservation>, StoreError> {
        Err(StoreError::Query("connection reset mid-scan".to_owned()))
    }
}
