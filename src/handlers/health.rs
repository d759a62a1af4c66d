//! Health check handler

use axum::{extract::State, Json};
use serde_json::json;

use crate::AppState;

pub async fn check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let models: Vec<&str> = state.models.iter().map(|m| m.name()).collect();
    Json(json!({
        "status": "ok",
        "models": models,
    }))
}
