//! Conservative latitude/longitude pre-filter for ledger scans.
//!
//! A [`ScanWindow`] lets a store use a `(latitude, longitude)` index
//! instead of reading every row. The window is a superset of the search
//! circle: it never excludes a point whose haversine distance is within
//! the radius. Final inclusion is always decided by the exact distance.
//!
//! The longitude band is dropped (full range) whenever the circle reaches
//! a pole or crosses the antimeridian; both cases are rare at the radii
//! the service answers and the full-range fallback keeps the bound sound.

use dockify_types::{GeoPoint, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

use crate::haversine::EARTH_RADIUS_METERS;

/// Slack added on every side of the window, in degrees.
///
/// Stored coordinates have six fractional digits; this is one unit of
/// that precision and dwarfs any floating-point error in the bounds.
const WINDOW_PAD_DEGREES: f64 = 1e-6;

/// Inclusive degree bounds a scan is restricted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    min_latitude: f64,
    max_latitude: f64,
    longitude: Option<(f64, f64)>,
}

impl ScanWindow {
    /// A window covering the whole globe.
    pub const fn unbounded() -> Self {
        Self {
            min_latitude: MIN_LATITUDE,
            max_latitude: MAX_LATITUDE,
            longitude: None,
        }
    }

    /// The smallest axis-aligned window enclosing every point within
    /// `radius_meters` of `origin`.
    pub fn around(origin: GeoPoint, radius_meters: f64) -> Self {
        if !radius_meters.is_finite() || radius_meters < 0.0 {
            return Self::unbounded();
        }

        let angular = radius_meters / EARTH_RADIUS_METERS;
        let angular_deg = angular.to_degrees();

        // Great-circle distance is never less than R * |Δlat|.
        let min_latitude = origin.latitude() - angular_deg - WINDOW_PAD_DEGREES;
        let max_latitude = origin.latitude() + angular_deg + WINDOW_PAD_DEGREES;

        if min_latitude <= MIN_LATITUDE || max_latitude >= MAX_LATITUDE {
            return Self {
                min_latitude: min_latitude.max(MIN_LATITUDE),
                max_latitude: max_latitude.min(MAX_LATITUDE),
                longitude: None,
            };
        }

        // Pole is outside the circle, so sin(angular) < cos(lat) and the
        // ratio stays below 1.
        let ratio = angular.sin() / origin.latitude().to_radians().cos();
        let dlon_deg = ratio.clamp(-1.0, 1.0).asin().to_degrees();
        let min_longitude = origin.longitude() - dlon_deg - WINDOW_PAD_DEGREES;
        let max_longitude = origin.longitude() + dlon_deg + WINDOW_PAD_DEGREES;

        let longitude = if min_longitude < MIN_LONGITUDE || max_longitude > MAX_LONGITUDE {
            None
        } else {
            Some((min_longitude, max_longitude))
        };

        Self {
            min_latitude,
            max_latitude,
            longitude,
        }
    }

    /// Lower latitude bound in degrees.
    pub const fn min_latitude(&self) -> f64 {
        self.min_latitude
    }

    /// Upper latitude bound in degrees.
    pub const fn max_latitude(&self) -> f64 {
        self.max_latitude
    }

    /// Longitude bounds in degrees, or `None` for the full range.
    pub const fn longitude(&self) -> Option<(f64, f64)> {
        self.longitude
    }

    /// Whether the window admits the point.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let lat = point.latitude();
        if lat < self.min_latitude || lat > self.max_latitude {
            return false;
        }
        self.longitude
            .is_none_or(|(min, max)| (min..=max).contains(&point.longitude()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::haversine_meters;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap_or_else(|e| panic!("bad test point: {e}"))
    }

    /// Walk a grid around the origin and check every point inside the
    /// radius is admitted by the window.
    fn assert_sound(origin: GeoPoint, radius: f64) {
        let window = ScanWindow::around(origin, radius);
        let span = (radius / EARTH_RADIUS_METERS).to_degrees() * 3.0;
        let steps = 60_i32;
        for i in -steps..=steps {
            for j in -steps..=steps {
                let lat = origin.latitude() + span * f64::from(i) / f64::from(steps);
                let mut lon = origin.longitude() + span * f64::from(j) / f64::from(steps);
                if !(-90.0..=90.0).contains(&lat) {
                    continue;
                }
                if lon > 180.0 {
                    lon -= 360.0;
                } else if lon < -180.0 {
                    lon += 360.0;
                }
                let Ok(p) = GeoPoint::new(lat, lon) else { continue };
                if haversine_meters(origin, p) <= radius {
                    assert!(
                        window.contains(p),
                        "window {window:?} rejects {p:?} within {radius} m of {origin:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn window_is_sound_at_mid_latitudes() {
        assert_sound(point(55.755_825, 37.617_396), 5_000.0);
        assert_sound(point(-33.9, 151.2), 20_000.0);
        assert_sound(point(0.0, 0.0), 20_000.0);
    }

    #[test]
    fn window_is_sound_at_high_latitude() {
        assert_sound(point(78.2, 15.6), 50_000.0);
    }

    #[test]
    fn window_drops_longitude_band_near_pole() {
        let window = ScanWindow::around(point(89.99, 0.0), 5_000.0);
        assert!(window.longitude().is_none());
        assert!(window.contains(point(89.995, 179.0)));
        assert_sound(point(89.99, 0.0), 5_000.0);
    }

    #[test]
    fn window_drops_longitude_band_across_antimeridian() {
        let window = ScanWindow::around(point(10.0, 179.99), 10_000.0);
        assert!(window.longitude().is_none());
        assert!(window.contains(point(10.0, -179.99)));
        assert_sound(point(10.0, 179.99), 10_000.0);
    }

    #[test]
    fn window_excludes_far_points() {
        let window = ScanWindow::around(point(0.0, 0.0), 1_000.0);
        assert!(!window.contains(point(0.1, 0.0)));
        assert!(!window.contains(point(0.0, 0.1)));
        assert!(window.contains(point(0.005, 0.005)));
    }

    #[test]
    fn huge_radius_covers_everything() {
        let window = ScanWindow::around(point(0.0, 0.0), 30_000_000.0);
        assert!(window.contains(point(-90.0, 180.0)));
        assert!(window.contains(point(90.0, -180.0)));
    }

    #[test]
    fn unbounded_contains_all() {
        let window = ScanWindow::unbounded();
        assert!(window.contains(point(-90.0, -180.0)));
        assert!(window.contains(point(90.0, 180.0)));
    }
}
