//! Great-circle distance on a spherical Earth.
//!
//! Uses the haversine formula with a mean radius of 6,371,000 m. The
//! spherical model is off by up to ~0.5% against the WGS-84 ellipsoid,
//! which is fine for the hundreds-of-meters to tens-of-kilometers radii the
//! service answers.

use dockify_types::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distance in meters between two points.
///
/// `d = 2R * asin(sqrt(sin²(Δlat/2) + cos(lat1) * cos(lat2) * sin²(Δlon/2)))`
///
/// The inner term is clamped to `[0, 1]` so that rounding near antipodal
/// points cannot produce `NaN`.
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let half_dlat = (b.latitude() - a.latitude()).to_radians() / 2.0;
    let half_dlon = (b.longitude() - a.longitude()).to_radians() / 2.0;

    let h = half_dlon
        .sin()
        .powi(2)
        .mul_add(lat1.cos() * lat2.cos(), half_dlat.sin().powi(2))
        .clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap_or_else(|e| panic!("bad test point: {e}"))
    }

    #[test]
    fn self_distance_is_zero() {
        for (lat, lon) in [(0.0, 0.0), (55.755_825, 37.617_396), (-90.0, 180.0), (43.2, -76.8)] {
            let p = point(lat, lon);
            assert_eq!(haversine_meters(p, p), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (point(0.0, 0.0), point(0.09, 0.0)),
            (point(55.755_825, 37.617_396), point(43.222_015, 76.851_248)),
            (point(-33.9, 151.2), point(51.5, -0.12)),
            (point(89.9, 10.0), point(-89.9, -170.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_meters(a, b), haversine_meters(b, a));
        }
    }

    #[test]
    fn one_thousandth_degree_of_latitude_is_about_111_meters() {
        let d = haversine_meters(point(0.0, 0.0), point(0.001, 0.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn moscow_to_almaty_matches_reference() {
        let d = haversine_meters(point(55.755_825, 37.617_396), point(43.222_015, 76.851_248));
        assert!((d - 3_102_834.94).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_meters(point(0.0, 0.0), point(0.0, 180.0));
        let expected = std::f64::consts::PI * EARTH_RADIUS_METERS;
        assert!((d - expected).abs() < 1e-6, "got {d}");
    }
}
