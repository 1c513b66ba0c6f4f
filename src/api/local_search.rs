use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use super::{domain_error_response, error_response};
use crate::domain::Landmark;
use crate::domain::landmark::{landmark_color, landmark_id};
use crate::infrastructure::AppState;
use crate::modules::integrations::local_search::{
    self, LocalSearchError, LocalSearchParams, landmarks_from_response,
};

// Shared by both routes: key check, parameter check, upstream call.
async fn fetch_upstream(state: &AppState, params: LocalSearchParams) -> Result<Value, Response> {
    let Some(api_key) = state.config.local_search_api_key.as_deref() else {
        return Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API key is not configured",
        ));
    };

    let Some(query) = params.into_query() else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Missing required parameters: lat and lon",
        ));
    };

    match local_search::search(&state.http, &state.config.local_search_url, api_key, &query).await
    {
        Ok(data) => Ok(data),
        Err(LocalSearchError::Status(code)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY);
            Err(error_response(
                status,
                format!("Yahoo API responded with status: {}", code),
            ))
        }
        Err(LocalSearchError::Transport(e)) => {
            tracing::error!("Error fetching Yahoo! Local Search API: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data from Yahoo API",
            ))
        }
    }
}

/// Proxy to the local search API, relaying its JSON body unchanged
pub async fn yahoo_local_search(
    State(state): State<AppState>,
    Query(params): Query<LocalSearchParams>,
) -> Response {
    match fetch_upstream(&state, params).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(response) => response,
    }
}

#[derive(Debug, Serialize)]
pub struct NearbyLandmark {
    #[serde(flatten)]
    pub landmark: Landmark,
    pub landmark_id: String,
    pub color: &'static str,
    pub visited: bool,
}

/// Local search results as landmarks, annotated with color and visited state
pub async fn nearby_landmarks(
    State(state): State<AppState>,
    Query(params): Query<LocalSearchParams>,
) -> Response {
    let data = match fetch_upstream(&state, params).await {
        Ok(data) => data,
        Err(response) => return response,
    };

    let visited = match state.visited.load_visited().await {
        Ok(v) => v,
        Err(e) => return domain_error_response(&e),
    };

    let landmarks: Vec<NearbyLandmark> = landmarks_from_response(&data)
        .into_iter()
        .map(|landmark| {
            let id = landmark_id(&landmark);
            NearbyLandmark {
                color: landmark_color(landmark.genre_code.as_deref()),
                visited: visited.contains(&id),
                landmark_id: id,
                landmark,
            }
        })
        .collect();

    Json(json!({
        "count": landmarks.len(),
        "landmarks": landmarks,
    }))
    .into_response()
}
