//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use super::{DISPATCH_OUTCOMES_TOTAL, PROVIDER_LATENCY, REGISTERED_USERS, REGISTRATIONS_TOTAL};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording registry metrics
pub struct RegistryMetrics;

impl RegistryMetrics {
    /// Record an accepted registration
    pub fn record_registration(replaced: bool) {
        let kind = if replaced { "replaced" } else { "new" };
        REGISTRATIONS_TOTAL.with_label_values(&[kind]).inc();
    }

    pub fn set_registered_users(count: usize) {
        REGISTERED_USERS.set(count as i64);
    }
}

/// Helper struct for recording dispatch metrics
pub struct DispatchMetrics;

impl DispatchMetrics {
    /// Record the outcome of a dispatch ("user"/"topic", "sent"/"user_not_found"/"provider_error")
    pub fn record_outcome(target: &str, outcome: &str) {
        DISPATCH_OUTCOMES_TOTAL
            .with_label_values(&[target, outcome])
            .inc();
    }

    pub fn observe_provider_latency(elapsed: Duration) {
        PROVIDER_LATENCY.observe(elapsed.as_secs_f64());
    }
}
