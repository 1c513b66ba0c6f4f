pub mod geofence;
pub mod health;
pub mod landmarks;
pub mod local_search;
pub mod quests;
pub mod visited;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Local search proxy
        .route("/yahoo-local-search", get(local_search::yahoo_local_search))
        .route("/landmarks/nearby", get(local_search::nearby_landmarks))
        .route("/landmarks/info", post(landmarks::landmark_info))
        // Visited landmarks
        .route(
            "/visited",
            get(visited::list_visited).post(visited::add_visited),
        )
        .route(
            "/visited/details",
            get(visited::list_visited_details).post(visited::add_visited_details),
        )
        // Geofence
        .route("/geofence/check", post(geofence::check_geofence))
        .route("/geofence/circle", get(geofence::circle))
        // Quest backend passthrough
        .route("/quests", get(quests::list_quests).post(quests::create_quest))
        .route(
            "/quests/:id",
            put(quests::update_quest).delete(quests::delete_quest),
        )
        .with_state(state)
}

/// `{"error": message}` envelope with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Map a domain failure onto the HTTP error taxonomy
pub fn domain_error_response(err: &DomainError) -> Response {
    let status = match err {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::External(_) => StatusCode::BAD_GATEWAY,
        DomainError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Storage(_) | DomainError::Internal(_) => {
            tracing::error!("{}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, err.to_string())
}
