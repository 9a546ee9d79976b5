//! In-process [`ObservationStore`] backed by a vector.
//!
//! Used by the test suites and by `dockify-server` when no database URL is
//! configured. Rows and the id counter live under one
//! [`tokio::sync::RwLock`] so ids are handed out in insertion order.

use chrono::Utc;
use dockify_types::{Coordinate, EntityId, LocationObservation, ObservationId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::ObservationStore;
use crate::window::ScanWindow;

#[derive(Debug, Default)]
struct Rows {
    observations: Vec<LocationObservation>,
    last_id: i64,
}

/// Append-only observation store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Rows>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored observations.
    pub async fn len(&self) -> usize {
        self.rows.read().await.observations.len()
    }

    /// Whether the store holds no observations.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.observations.is_empty()
    }
}

impl ObservationStore for MemoryStore {
    async fn append(
        &self,
        entity_id: EntityId,
        coordinate: Coordinate,
    ) -> Result<ObservationId, StoreError> {
        let mut rows = self.rows.write().await;
        let id = rows.last_id.checked_add(1).ok_or(StoreError::IdExhausted)?;
        rows.last_id = id;
        rows.observations.push(LocationObservation {
            id: ObservationId::new(id),
            entity_id,
            coordinate,
            recorded_at: Utc::now(),
        });
        Ok(ObservationId::new(id))
    }

    async fn scan(&self, window: ScanWindow) -> Result<Vec<LocationObservation>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .observations
            .iter()
            .filter(|obs| window.contains(obs.coordinate.point()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::from_degrees(lat, lon).unwrap_or_else(|e| panic!("bad test coordinate: {e}"))
    }

    #[tokio::test]
    async fn ids_increase_with_insertion_order() {
        let store = MemoryStore::new();
        let a = store.append(EntityId::new(1), coord(0.0, 0.0)).await;
        let b = store.append(EntityId::new(1), coord(0.0, 0.0)).await;
        let c = store.append(EntityId::new(2), coord(1.0, 1.0)).await;

        assert_eq!(a.ok(), Some(ObservationId::new(1)));
        assert_eq!(b.ok(), Some(ObservationId::new(2)));
        assert_eq!(c.ok(), Some(ObservationId::new(3)));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn scan_applies_window() {
        let store = MemoryStore::new();
        let _ = store.append(EntityId::new(1), coord(0.0, 0.0)).await;
        let _ = store.append(EntityId::new(2), coord(45.0, 45.0)).await;

        let origin = coord(0.0, 0.0).point();
        let near = store.scan(ScanWindow::around(origin, 1_000.0)).await;
        assert_eq!(near.map(|rows| rows.len()).ok(), Some(1));

        let all = store.scan(ScanWindow::unbounded()).await;
        assert_eq!(all.map(|rows| rows.len()).ok(), Some(2));
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        let rows = store.scan(ScanWindow::unbounded()).await;
        assert!(rows.is_ok_and(|r| r.is_empty()));
    }
}
