use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::domain_error_response;
use crate::domain::Landmark;
use crate::domain::landmark::{landmark_id, render_info_content};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct InfoRequest {
    pub landmark: Landmark,
}

/// Info-window HTML for a landmark, using the stored visited state and the
/// configured visibility policy
pub async fn landmark_info(
    State(state): State<AppState>,
    Json(payload): Json<InfoRequest>,
) -> Response {
    let id = landmark_id(&payload.landmark);
    let visited = match state.visited.is_visited(&id).await {
        Ok(v) => v,
        Err(e) => return domain_error_response(&e),
    };

    Html(render_info_content(
        &payload.landmark,
        visited,
        state.config.info_window_policy,
    ))
    .into_response()
}
