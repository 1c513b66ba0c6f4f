//! Geofence helpers: circle approximation and great-circle distance

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Vertex count used when drawing a geofence circle
pub const DEFAULT_CIRCLE_POINTS: usize = 24;

/// Meters per degree of latitude for the equirectangular approximation
pub const METERS_PER_DEGREE: f64 = 111_300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for Point<f64> {
    fn from(position: LatLng) -> Self {
        Point::new(position.lng, position.lat)
    }
}

/// Polygon vertices approximating a circle of `radius_m` meters around `center`.
///
/// Uses a flat-earth approximation (longitude scaled by the cosine of the
/// center latitude). Good enough for geofences of a few hundred meters; it
/// distorts for large radii and near the poles.
pub fn circle_points(center: LatLng, radius_m: f64, num_points: usize) -> Vec<LatLng> {
    let d = radius_m / METERS_PER_DEGREE;
    let lng_scale = center.lat.to_radians().cos();

    (0..num_points)
        .map(|i| {
            let angle = (i as f64 / num_points as f64) * 2.0 * std::f64::consts::PI;
            LatLng {
                lat: center.lat + angle.sin() * d,
                lng: center.lng + angle.cos() * d / lng_scale,
            }
        })
        .collect()
}

/// Great-circle distance between two positions, in meters.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    Point::from(a).haversine_distance(&Point::from(b))
}

pub fn is_within_distance(user: LatLng, target: LatLng, max_distance_m: f64) -> bool {
    distance_meters(user, target) <= max_distance_m
}
