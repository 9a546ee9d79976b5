//! Validated geographic points.
//!
//! Two representations exist:
//!
//! - [`GeoPoint`] -- an `f64` pair used as a query origin and for all
//!   distance math.
//! - [`Coordinate`] -- the stored form. Latitude and longitude are fixed
//!   precision decimals with [`COORDINATE_SCALE`] fractional digits
//!   (~0.11 m at the equator), matching the `NUMERIC(9,6)` columns.
//!
//! Both constructors reject non-finite and out-of-range values. Rounding
//! to six digits happens once, when a [`Coordinate`] is built, so every
//! later distance computation sees the same stored value.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for stored coordinates.
pub const COORDINATE_SCALE: u32 = 6;

/// Lowest valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
/// Highest valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;
/// Lowest valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
/// Highest valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Reasons a latitude/longitude pair is rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// Latitude is NaN, infinite, or outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    /// Longitude is NaN, infinite, or outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    /// A decimal value could not be represented as `f64` or vice versa.
    #[error("coordinate value is not representable")]
    NotRepresentable,
}

fn check_latitude(latitude: f64) -> Result<(), CoordinateError> {
    if latitude.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        Ok(())
    } else {
        Err(CoordinateError::Latitude(latitude))
    }
}

fn check_longitude(longitude: f64) -> Result<(), CoordinateError> {
    if longitude.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        Ok(())
    } else {
        Err(CoordinateError::Longitude(longitude))
    }
}

/// A validated point in degrees, used for distance computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range degrees.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Latitude`] or [`CoordinateError::Longitude`]
    /// for the first offending component.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A stored coordinate with six fractional digits.
///
/// Keeps the exact decimal (what the ledger persists and what clients get
/// back) alongside the `f64` projection used for distance math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: Decimal,
    longitude: Decimal,
    point: GeoPoint,
}

impl Coordinate {
    /// Build a stored coordinate from raw client degrees.
    ///
    /// The raw values are range-checked first, then rounded half away from
    /// zero to [`COORDINATE_SCALE`] digits, the same rounding `PostgreSQL`
    /// applies when casting into `NUMERIC(9,6)`.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either component is non-finite or
    /// out of range.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        check_latitude(latitude)?;
        check_longitude(longitude)?;
        let lat = Decimal::from_f64(latitude).ok_or(CoordinateError::Latitude(latitude))?;
        let lon = Decimal::from_f64(longitude).ok_or(CoordinateError::Longitude(longitude))?;
        Self::from_decimal(lat, lon)
    }

    /// Build a stored coordinate from decimal degrees (e.g. a database row).
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either component is out of range or
    /// cannot be projected to `f64`.
    pub fn from_decimal(latitude: Decimal, longitude: Decimal) -> Result<Self, CoordinateError> {
        let latitude =
            latitude.round_dp_with_strategy(COORDINATE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let longitude = longitude
            .round_dp_with_strategy(COORDINATE_SCALE, RoundingStrategy::MidpointAwayFromZero);

        let lat_f = latitude.to_f64().ok_or(CoordinateError::NotRepresentable)?;
        let lon_f = longitude.to_f64().ok_or(CoordinateError::NotRepresentable)?;
        let point = GeoPoint::new(lat_f, lon_f)?;

        Ok(Self {
            latitude,
            longitude,
            point,
        })
    }

    /// Latitude as stored.
    pub const fn latitude(&self) -> Decimal {
        self.latitude
    }

    /// Longitude as stored.
    pub const fn longitude(&self) -> Decimal {
        self.longitude
    }

    /// The `f64` projection of the stored value.
    pub const fn point(&self) -> GeoPoint {
        self.point
    }
}
