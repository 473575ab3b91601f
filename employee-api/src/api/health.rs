//! Root and health check endpoints

use axum::Json;
use axum::extract::State;

use crate::state::AppState;

/// Service banner
pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": state.config.app_name,
        "version": state.config.app_version,
        "status": "running",
    }))
}

/// Liveness probe; does not touch the database
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.app_name,
    }))
}
