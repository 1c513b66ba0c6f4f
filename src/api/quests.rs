use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::domain_error_response;
use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::modules::integrations::quest_api::{QuestClient, QuestFields};

fn quest_client(state: &AppState) -> Result<&QuestClient, Response> {
    state.quests.as_ref().ok_or_else(|| {
        domain_error_response(&DomainError::Configuration(
            "Quest backend is not configured".to_string(),
        ))
    })
}

pub async fn list_quests(State(state): State<AppState>) -> Response {
    let client = match quest_client(&state) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match client.get_quests().await {
        Ok(quests) => (StatusCode::OK, Json(quests)).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

pub async fn create_quest(
    State(state): State<AppState>,
    Json(payload): Json<QuestFields>,
) -> Response {
    let client = match quest_client(&state) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match client.create_quest(&payload).await {
        Ok(quest) => (StatusCode::OK, Json(quest)).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

pub async fn update_quest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<QuestFields>,
) -> Response {
    let client = match quest_client(&state) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match client.update_quest(id, &payload).await {
        Ok(quest) => (StatusCode::OK, Json(quest)).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

pub async fn delete_quest(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let client = match quest_client(&state) {
        Ok(c) => c,
        Err(response) => return response,
    };

    match client.delete_quest(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(&e),
    }
}
