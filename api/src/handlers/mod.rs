//! API handlers

pub mod reports;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub backend: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.repository.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            warn!("Database health probe failed: {}", e);
            "unavailable"
        }
    };

    let backend = match &state.backend {
        None => "disabled",
        Some(client) => match client.health().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!("Backend health probe failed: {}", e);
                "unavailable"
            }
        },
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        backend: backend.to_string(),
    })
}
