//! Health check endpoint

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use shared::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - liveness plus a database ping
async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    state
        .db
        .query("RETURN 1")
        .await
        .map_err(|e| AppError::database(format!("Health ping failed: {e}")))?;

    Ok(Json(HealthStatus {
        status: "ok",
        database: "ok",
    }))
}
