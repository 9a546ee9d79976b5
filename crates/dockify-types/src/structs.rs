//! Core records: stored observations and ranked query results.

use chrono::{DateTime, Utc};

use crate::geo::Coordinate;
use crate::ids::{EntityId, ObservationId};

/// One immutable location report, as held by the ledger.
///
/// `recorded_at` is stamped by the store at insertion time and is
/// informational only; recency ordering uses [`ObservationId`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationObservation {
    /// Store-assigned, monotonically increasing identifier.
    pub id: ObservationId,
    /// The reporting entity.
    pub entity_id: EntityId,
    /// Stored six-digit coordinate.
    pub coordinate: Coordinate,
    /// Store clock at insertion.
    pub recorded_at: DateTime<Utc>,
}

/// One ranked row of a radius query.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyEntity {
    /// The neighbouring entity.
    pub entity_id: EntityId,
    /// The observation selected to represent the entity.
    pub coordinate: Coordinate,
    /// Great-circle distance from the query origin in meters.
    pub distance_meters: f64,
}
