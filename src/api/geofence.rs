use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;

use super::domain_error_response;
use crate::domain::geofence::{DEFAULT_CIRCLE_POINTS, circle_points, distance_meters};
use crate::domain::landmark::landmark_id;
use crate::domain::{DomainError, Landmark, LatLng, StoredLandmark};
use crate::infrastructure::AppState;

const MAX_CIRCLE_POINTS: usize = 1440;

#[derive(Debug, Deserialize)]
pub struct GeofenceCheckRequest {
    pub position: LatLng,
    pub landmark: Landmark,
    pub radius_m: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct GeofenceCheckResponse {
    pub landmark_id: String,
    pub distance_m: f64,
    pub radius_m: f64,
    pub within: bool,
    pub newly_visited: bool,
    pub visited: BTreeSet<String>,
}

fn check_radius(radius: f64) -> Result<f64, DomainError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(DomainError::Validation(
            "radius_m must be a non-negative number".to_string(),
        ))
    }
}

/// Check the user's position against a landmark's geofence and record the
/// visit when inside it
pub async fn check_geofence(
    State(state): State<AppState>,
    Json(payload): Json<GeofenceCheckRequest>,
) -> Response {
    let radius_m = match check_radius(payload.radius_m.unwrap_or(state.config.geofence_radius_m)) {
        Ok(r) => r,
        Err(e) => return domain_error_response(&e),
    };

    let target = LatLng::new(payload.landmark.latitude, payload.landmark.longitude);
    let distance_m = distance_meters(payload.position, target);
    let within = distance_m <= radius_m;
    let id = landmark_id(&payload.landmark);

    let result = if within {
        state
            .visited
            .add_visited_with_details(StoredLandmark::from_landmark(&payload.landmark))
            .await
            .map(|snapshot| (snapshot.inserted, snapshot.visited))
    } else {
        state.visited.load_visited().await.map(|v| (false, v))
    };

    match result {
        Ok((newly_visited, visited)) => {
            if newly_visited {
                tracing::info!("Geofence entered for {} at {:.1} m", id, distance_m);
            }
            Json(GeofenceCheckResponse {
                landmark_id: id,
                distance_m,
                radius_m,
                within,
                newly_visited,
                visited,
            })
            .into_response()
        }
        Err(e) => domain_error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CircleQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_m: Option<f64>,
    pub points: Option<usize>,
}

/// Polygon approximating a geofence circle, for map rendering
pub async fn circle(State(state): State<AppState>, Query(params): Query<CircleQuery>) -> Response {
    let radius_m = match check_radius(params.radius_m.unwrap_or(state.config.geofence_radius_m)) {
        Ok(r) => r,
        Err(e) => return domain_error_response(&e),
    };

    let points = params.points.unwrap_or(DEFAULT_CIRCLE_POINTS);
    if points == 0 || points > MAX_CIRCLE_POINTS {
        return domain_error_response(&DomainError::Validation(format!(
            "points must be between 1 and {}",
            MAX_CIRCLE_POINTS
        )));
    }

    let center = LatLng::new(params.lat, params.lng);
    Json(json!({
        "center": center,
        "radius_m": radius_m,
        "points": circle_points(center, radius_m, points),
    }))
    .into_response()
}
