//! Prometheus metrics for the push gateway.
//!
//! - Registry metrics (registrations, registered users)
//! - Dispatch metrics (outcomes by target kind)
//! - Provider latency

mod helpers;

pub use helpers::{encode_metrics, DispatchMetrics, RegistryMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram, IntCounterVec,
    IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "push_gateway";

lazy_static! {
    // ============================================================================
    // Registry Metrics
    // ============================================================================

    /// Registrations accepted, labelled by whether an existing token was replaced
    pub static ref REGISTRATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_registrations_total", METRIC_PREFIX),
        "Total registrations accepted",
        &["kind"]
    ).unwrap();

    /// Users with a registered token
    pub static ref REGISTERED_USERS: IntGauge = register_int_gauge!(
        format!("{}_registered_users", METRIC_PREFIX),
        "Number of users with a registered device token"
    ).unwrap();

    // ============================================================================
    // Dispatch Metrics
    // ============================================================================

    /// Dispatch outcomes by target kind
    pub static ref DISPATCH_OUTCOMES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_dispatch_outcomes_total", METRIC_PREFIX),
        "Dispatch outcomes by target kind",
        &["target", "outcome"]
    ).unwrap();

    /// Time spent waiting on the push provider
    pub static ref PROVIDER_LATENCY: Histogram = register_histogram!(
        format!("{}_provider_latency_seconds", METRIC_PREFIX),
        "Push provider send latency in seconds",
        vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();
}
