//! Shared type definitions for the Dockify proximity service.
//!
//! This crate is the single source of truth for identifiers, coordinates,
//! observation records, and the JSON bodies exchanged with mobile clients.
//! Wire types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Typed wrappers for entity and observation identifiers
//! - [`geo`] -- Validated query points and six-digit stored coordinates
//! - [`structs`] -- Stored observations and ranked query results
//! - [`enums`] -- Selection policy
//! - [`wire`] -- HTTP request/response bodies

pub mod enums;
pub mod geo;
pub mod ids;
pub mod structs;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use enums::SelectionPolicy;
pub use geo::{
    COORDINATE_SCALE, Coordinate, CoordinateError, GeoPoint, MAX_LATITUDE, MAX_LONGITUDE,
    MIN_LATITUDE, MIN_LONGITUDE,
};
pub use ids::{EntityId, ObservationId};
pub use structs::{LocationObservation, NearbyEntity};
pub use wire::{
    CreatedObservationResponse, IngestLocationRequest, NearbyUserResponse, NearestUsersRequest,
    ReportedLocation, StoredLocation,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the wire types.

    #[test]
    fn export_bindings() {
        // The files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::EntityId::export_all();
        let _ = crate::ids::ObservationId::export_all();
        let _ = crate::enums::SelectionPolicy::export_all();
        let _ = crate::wire::ReportedLocation::export_all();
        let _ = crate::wire::IngestLocationRequest::export_all();
        let _ = crate::wire::CreatedObservationResponse::export_all();
        let _ = crate::wire::NearestUsersRequest::export_all();
        let _ = crate::wire::StoredLocation::export_all();
        let _ = crate::wire::NearbyUserResponse::export_all();
    }
}
