//! Health check and statistics endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::dispatch::DispatchStatsSnapshot;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub provider: String,
    pub registered_users: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub registered_users: usize,
    pub dispatch: DispatchStatsSnapshot,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        provider: state.dispatcher.provider_name().to_string(),
        registered_users: state.dispatcher.registered_users(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        registered_users: state.dispatcher.registered_users(),
        dispatch: state.dispatcher.stats(),
    })
}
