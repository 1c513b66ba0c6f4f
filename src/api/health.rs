use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "landmark-quest",
        "version": env!("CARGO_PKG_VERSION"),
        "local_search_configured": state.config.local_search_api_key.is_some(),
        "quest_backend_configured": state.quests.is_some(),
        "info_window_policy": state.config.info_window_policy.to_string(),
    }))
}
