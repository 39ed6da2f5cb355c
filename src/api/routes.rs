use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::server::{api_key_auth, AppState};

use super::handlers::{broadcast, ping, register, send_user};
use super::health::{health, stats};
use super::metrics::prometheus_metrics;

pub fn api_routes(state: &AppState) -> Router<AppState> {
    // Registration and send endpoints, guarded by the optional API key
    let notification_routes = Router::new()
        .route("/register", post(register))
        .route("/send-user", post(send_user))
        .route("/broadcast", post(broadcast))
        .route_layer(middleware::from_fn_with_state(state.clone(), api_key_auth));

    Router::new()
        // Liveness, health & stats
        .route("/ping", get(ping))
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/metrics", get(prometheus_metrics))
        .merge(notification_routes)
}
