//! Error types for the proximity core.
//!
//! [`ProximityError`] is the complete taxonomy callers see. Validation
//! variants are raised before any store access; [`StoreError`] is the only
//! failure that can happen mid-operation and is surfaced unchanged inside
//! [`ProximityError::StoreUnavailable`]. Nothing in this crate retries.

use dockify_types::CoordinateError;

/// Failure of the persistence layer behind an
/// [`ObservationStore`](crate::store::ObservationStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, pool timeout).
    #[error("connection failed: {0}")]
    Connection(String),

    /// A statement was sent but failed to complete.
    #[error("query failed: {0}")]
    Query(String),

    /// A persisted row violated the observation invariants.
    #[error("corrupt observation row {id}: {reason}")]
    CorruptRow {
        /// Raw id of the offending row.
        id: i64,
        /// Why the row was rejected.
        reason: String,
    },

    /// The store ran out of observation ids.
    #[error("observation id space exhausted")]
    IdExhausted,
}

/// Errors returned by the ledger and the query engine.
#[derive(Debug, thiserror::Error)]
pub enum ProximityError {
    /// Latitude or longitude out of range (or not a finite number).
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    /// Radius was zero or negative.
    #[error("invalid radius {0}: must be a positive number of meters")]
    InvalidRadius(i64),

    /// The underlying store failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl ProximityError {
    /// Whether the error was caused by caller input rather than the store.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidCoordinate(_) | Self::InvalidRadius(_))
    }
}
