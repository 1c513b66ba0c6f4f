use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::domain_error_response;
use crate::domain::{DomainError, StoredLandmark};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct AddVisitedRequest {
    pub id: String,
}

// Ids are stored exactly as given; only blank ones are rejected
fn require_id(id: &str) -> Result<(), DomainError> {
    if id.trim().is_empty() {
        return Err(DomainError::Validation("Missing landmark id".to_string()));
    }
    Ok(())
}

pub async fn list_visited(State(state): State<AppState>) -> Response {
    match state.visited.load_visited().await {
        Ok(visited) => Json(json!({
            "count": visited.len(),
            "visited": visited,
        }))
        .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

pub async fn add_visited(
    State(state): State<AppState>,
    Json(payload): Json<AddVisitedRequest>,
) -> Response {
    if let Err(e) = require_id(&payload.id) {
        return domain_error_response(&e);
    }

    match state.visited.add_visited(&payload.id).await {
        Ok(visited) => Json(json!({
            "count": visited.len(),
            "visited": visited,
        }))
        .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

pub async fn list_visited_details(State(state): State<AppState>) -> Response {
    match state.visited.load_details().await {
        Ok(landmarks) => Json(json!({
            "count": landmarks.len(),
            "landmarks": landmarks,
        }))
        .into_response(),
        Err(e) => domain_error_response(&e),
    }
}

pub async fn add_visited_details(
    State(state): State<AppState>,
    Json(landmark): Json<StoredLandmark>,
) -> Response {
    if let Err(e) = require_id(&landmark.id) {
        return domain_error_response(&e);
    }

    match state.visited.add_visited_with_details(landmark).await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => domain_error_response(&e),
    }
}
