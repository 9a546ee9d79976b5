//! The persistence seam between the core and a concrete store.
//!
//! The [`ObservationStore`] trait is deliberately tiny: a single-row
//! insert and a windowed scan. Everything with semantics (validation,
//! distance math, selection) lives above it in the ledger and engine, so a
//! store only has to persist and return rows faithfully.
//!
//! Implementations:
//!
//! - [`MemoryStore`](crate::memory::MemoryStore) -- in-process, for tests
//!   and local runs
//! - `LocationStore` in `dockify-db` -- `PostgreSQL`

use std::future::Future;

use dockify_types::{Coordinate, EntityId, LocationObservation, ObservationId};

use crate::error::StoreError;
use crate::window::ScanWindow;

/// An append-only relation of location observations.
///
/// Both operations are independent and may run concurrently with any
/// number of others. Neither may retry internally.
pub trait ObservationStore: Send + Sync {
    /// Insert one immutable row and return its store-assigned id.
    ///
    /// The store stamps `recorded_at` with its own clock. Ids must increase
    /// with insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the row could not be durably written. On
    /// error the row must not be visible to later scans.
    fn append(
        &self,
        entity_id: EntityId,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<ObservationId, StoreError>> + Send;

    /// Return every observation whose coordinate falls inside `window`.
    ///
    /// The result is all-or-nothing: a scan that fails partway returns an
    /// error and no rows. Row order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the rows could not be read.
    fn scan(
        &self,
        window: ScanWindow,
    ) -> impl Future<Output = Result<Vec<LocationObservation>, StoreError>> + Send;
}
