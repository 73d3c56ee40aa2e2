//! 大円距離（ハバーサイン）

use crate::types::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;
const KM_TO_MILES: f64 = 0.621371;

/// 2点間の大円距離（マイル）
pub fn haversine_miles(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * KM_TO_MILES
}

/// 現在地からの距離
///
/// どちらかの座標が無い場合は無限大（ソートで常に末尾になる）
pub fn distance_from(user: Option<Coordinates>, target: Option<Coordinates>) -> f64 {
    match (user, target) {
        (Some(user), Some(target)) => haversine_miles(user, target),
        _ => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat, lng }
    }

    #[test]
    fn test_same_point_is_zero() {
        assert!(haversine_miles(at(42.0, -83.0), at(42.0, -83.0)).abs() < 1e-9);
    }

    #[test]
    fn test_short_distance() {
        // (42.0,-83.0) → (42.1,-83.1) は約8.6マイル
        let d = haversine_miles(at(42.0, -83.0), at(42.1, -83.1));
        assert!((d - 8.6).abs() < 0.1, "距離が想定外: {}", d);
    }

    #[test]
    fn test_long_distance() {
        // デトロイト → シカゴ 約238マイル
        let d = haversine_miles(at(42.3314, -83.0458), at(41.8781, -87.6298));
        assert!((d - 238.0).abs() < 3.0, "距離が想定外: {}", d);
    }

    #[test]
    fn test_symmetric() {
        let a = at(40.7128, -74.0060);
        let b = at(34.0522, -118.2437);
        assert!((haversine_miles(a, b) - haversine_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_from_missing_is_infinite() {
        assert!(distance_from(None, Some(at(1.0, 1.0))).is_infinite());
        assert!(distance_from(Some(at(1.0, 1.0)), None).is_infinite());
        assert!(distance_from(Some(at(1.0, 1.0)), Some(at(1.0, 1.0))).is_finite());
    }
}
