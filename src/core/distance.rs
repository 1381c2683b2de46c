use std::f64::consts::FRAC_PI_2;

use crate::models::{BoundingBox, Coordinate};

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers, the same unit partners store their service radius in
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1.0 for antipodal points
    let c = 2.0 * a.min(1.0).sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Calculate a bounding box containing every point within `radius_km` of a center
///
/// Uses the angular radius on the sphere rather than a flat 111 km/degree
/// approximation, so the box never cuts off a point that is actually in range.
/// When the circle reaches a pole every longitude is included.
pub fn calculate_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let angular = radius_km.max(0.0) / EARTH_RADIUS_KM;
    let lat = center.latitude.to_radians();
    let lon = center.longitude.to_radians();

    let min_lat = lat - angular;
    let max_lat = lat + angular;

    if min_lat > -FRAC_PI_2 && max_lat < FRAC_PI_2 {
        let delta_lon = (angular.sin() / lat.cos()).asin();
        BoundingBox {
            min_lat: min_lat.to_degrees(),
            max_lat: max_lat.to_degrees(),
            min_lon: (lon - delta_lon).to_degrees(),
            max_lon: (lon + delta_lon).to_degrees(),
        }
    } else {
        BoundingBox {
            min_lat: min_lat.max(-FRAC_PI_2).to_degrees(),
            max_lat: max_lat.min(FRAC_PI_2).to_degrees(),
            min_lon: -180.0,
            max_lon: 180.0,
        }
    }
}

/// Check if a point is within a bounding box, honoring antimeridian wrap
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    if point.latitude < bbox.min_lat || point.latitude > bbox.max_lat {
        return false;
    }
    if bbox.max_lon - bbox.min_lon >= 360.0 {
        return true;
    }

    [point.longitude, point.longitude + 360.0, point.longitude - 360.0]
        .iter()
        .any(|lon| *lon >= bbox.min_lon && *lon <= bbox.max_lon)
}
