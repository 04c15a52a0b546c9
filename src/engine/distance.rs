//! Great-circle distance between two coordinates.

use crate::models::Coordinates;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Points closer than this in both latitude and longitude are "the same place".
pub const NEAR_THRESHOLD_DEGREES: f64 = 0.0001;

/// Distance reported for points within [`NEAR_THRESHOLD_DEGREES`] of each other.
pub const NEAR_DISTANCE_KM: f64 = 0.01;

/// Returns the great-circle distance between `a` and `b` in kilometres.
///
/// Identical points are exactly `0.0`. Points within roughly 11 metres of
/// each other return [`NEAR_DISTANCE_KM`] instead of running the haversine
/// formula on a near-zero argument. NaN inputs produce NaN.
///
/// # Example
///
/// ```
/// use roster_engine::engine::distance_km;
/// use roster_engine::models::Coordinates;
///
/// let austin = Coordinates::new(30.2672, -97.7431);
/// let dallas = Coordinates::new(32.7767, -96.7970);
///
/// assert_eq!(distance_km(austin, austin), 0.0);
/// let d = distance_km(austin, dallas);
/// assert!((d - 293.1).abs() < 0.5);
/// ```
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }

    let d_lat = b.latitude - a.latitude;
    let d_lng = b.longitude - a.longitude;
    if d_lat.abs() < NEAR_THRESHOLD_DEGREES && d_lng.abs() < NEAR_THRESHOLD_DEGREES {
        return NEAR_DISTANCE_KM;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let h = (d_lat.to_radians() / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng.to_radians() / 2.0).sin().powi(2);
    // rounding can push near-antipodal points just past 1
    let h = if h > 1.0 { 1.0 } else { h };
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = Coordinates::new(40.7128, -74.0060);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_near_points_return_constant() {
        let a = Coordinates::new(40.7128, -74.0060);
        let b = Coordinates::new(40.71285, -74.00605);
        assert_eq!(distance_km(a, b), NEAR_DISTANCE_KM);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(1.0, 0.0);
        // 2 * pi * 6371 / 360
        assert!((distance_km(a, b) - 111.195).abs() < 0.01);
    }

    #[test]
    fn test_antipodal_points() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        assert!((distance_km(a, b) - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_nan_propagates() {
        let a = Coordinates::new(f64::NAN, 0.0);
        let b = Coordinates::new(1.0, 1.0);
        assert!(distance_km(a, b).is_nan());
    }

    fn coordinates() -> impl Strategy<Value = Coordinates> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinates::new(lat, lng))
    }

    proptest! {
        #[test]
        fn prop_distance_to_self_is_zero(p in coordinates()) {
            prop_assert_eq!(distance_km(p, p), 0.0);
        }

        #[test]
        fn prop_nearby_points_are_constant(
            p in coordinates(),
            d_lat in -0.00009f64..0.00009,
            d_lng in -0.00009f64..0.00009,
        ) {
            let q = Coordinates::new(p.latitude + d_lat, p.longitude + d_lng);
            prop_assume!(p != q);
            prop_assert_eq!(distance_km(p, q), NEAR_DISTANCE_KM);
        }

        #[test]
        fn prop_distance_is_symmetric(a in coordinates(), b in coordinates()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9, "{} != {}", ab, ba);
        }

        #[test]
        fn prop_distance_is_bounded(a in coordinates(), b in coordinates()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
