//! API layer - HTTP endpoint handlers.

mod extract;
mod handlers;
mod health;
mod metrics;
mod models;
mod routes;

pub use extract::JsonBody;
pub use handlers::{broadcast, ping, register, send_user};
pub use health::{health, stats, HealthResponse, StatsResponse};
pub use metrics::prometheus_metrics;
pub use models::{
    BroadcastRequest, BroadcastResponse, PingResponse, RegisterRequest, RegisterResponse,
    SendUserRequest, SendUserResponse,
};
pub use routes::api_routes;
