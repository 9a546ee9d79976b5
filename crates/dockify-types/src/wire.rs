//! JSON request and response bodies for the location API.
//!
//! Field names follow the mobile client's existing contract (`user_id`,
//! `location.latitude`, ...). Requests carry raw `f64` degrees; responses
//! carry the stored six-digit decimals serialized as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::ids::{EntityId, ObservationId};
use crate::structs::NearbyEntity;

/// Raw degrees as reported by a client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReportedLocation {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Body of `POST /api/v1/location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IngestLocationRequest {
    /// Reporting user. Must be a positive id.
    #[validate(range(min = 1))]
    #[ts(type = "number")]
    pub user_id: i64,
    /// The reported point.
    pub location: ReportedLocation,
}

/// Response of `POST /api/v1/location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreatedObservationResponse {
    /// Identifier assigned by the ledger.
    pub id: ObservationId,
}

/// Body of `POST /api/v1/location/nearest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NearestUsersRequest {
    /// The requesting user; never returned as its own neighbour.
    #[validate(range(min = 1))]
    #[ts(type = "number")]
    pub user_id: i64,
    /// Origin latitude in degrees.
    pub latitude: f64,
    /// Origin longitude in degrees.
    pub longitude: f64,
    /// Search radius in meters.
    #[ts(type = "number")]
    pub radius: i64,
}

/// A stored coordinate as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StoredLocation {
    /// Latitude with six fractional digits.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub latitude: Decimal,
    /// Longitude with six fractional digits.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(as = "f64")]
    pub longitude: Decimal,
}

/// One element of the `POST /api/v1/location/nearest` response array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NearbyUserResponse {
    /// The neighbouring user.
    pub user_id: EntityId,
    /// The selected observation for that user.
    pub location: StoredLocation,
    /// Great-circle distance from the origin in meters.
    pub distance_meters: f64,
}

impl From<&NearbyEntity> for NearbyUserResponse {
    fn from(entity: &NearbyEntity) -> Self {
        Self {
            user_id: entity.entity_id,
            location: StoredLocation {
                latitude: entity.coordinate.latitude(),
                longitude: entity.coordinate.longitude(),
            },
            distance_meters: entity.distance_meters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    #[test]
    fn nearest_request_parses_client_payload() {
        let body = r#"{"user_id": 3, "longitude": 37.617396, "latitude": 55.755825, "radius": 5000}"#;
        let req: Result<NearestUsersRequest, _> = serde_json::from_str(body);
        assert!(req.is_ok());
        let req = req.ok();
        assert_eq!(req.as_ref().map(|r| r.radius), Some(5000));
        assert_eq!(req.as_ref().map(|r| r.user_id), Some(3));
    }

    #[test]
    fn zero_user_id_fails_validation() {
        let req = NearestUsersRequest {
            user_id: 0,
            latitude: 0.0,
            longitude: 0.0,
            radius: 10,
        };
        assert!(req.validate().is_err());

        let ingest = IngestLocationRequest {
            user_id: 9,
            location: ReportedLocation {
                latitude: 1.0,
                longitude: 2.0,
            },
        };
        assert!(ingest.validate().is_ok());
    }

    #[test]
    fn nearby_response_serializes_numbers() {
        let coordinate = Coordinate::from_decimal(Decimal::new(43_222_015, 6), Decimal::new(76_851_248, 6));
        assert!(coordinate.is_ok());
        let Ok(coordinate) = coordinate else { return };

        let entity = NearbyEntity {
            entity_id: EntityId::new(5),
            coordinate,
            distance_meters: 12.5,
        };
        let value = serde_json::to_value(NearbyUserResponse::from(&entity)).ok();
        let expected = serde_json::json!({
            "user_id": 5,
            "location": { "latitude": 43.222015, "longitude": 76.851248 },
            "distance_meters": 12.5,
        });
        assert_eq!(value, Some(expected));
    }
}
