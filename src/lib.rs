// Shared infrastructure
pub mod config;
pub mod error;
pub mod metrics;

// Domain
pub mod dispatch;
pub mod provider;
pub mod registry;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod telemetry;
