use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::config::DispatchConfig;
use crate::metrics::DispatchMetrics;
use crate::provider::{PushMessage, PushProvider, PushTarget};
use crate::registry::TokenStore;

use super::{
    DispatchError, DispatchOutcome, DispatchResult, NotificationIntent, NotificationTarget,
};

/// Statistics for the dispatch service
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Accepted registrations
    pub registrations: AtomicU64,
    /// User-targeted send requests that passed validation
    pub user_sends: AtomicU64,
    /// Topic send requests that passed validation
    pub topic_sends: AtomicU64,
    /// Messages accepted by the provider
    pub total_sent: AtomicU64,
    /// User sends with no registered token
    pub user_not_found: AtomicU64,
    /// Sends the provider rejected or failed
    pub provider_errors: AtomicU64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            registrations: self.registrations.load(Ordering::Relaxed),
            user_sends: self.user_sends.load(Ordering::Relaxed),
            topic_sends: self.topic_sends.load(Ordering::Relaxed),
            total_sent: self.total_sent.load(Ordering::Relaxed),
            user_not_found: self.user_not_found.load(Ordering::Relaxed),
            provider_errors: self.provider_errors.load(Ordering::Relaxed),
        }
    }

    fn record_outcome(&self, outcome: DispatchOutcome) {
        let counter = match outcome {
            DispatchOutcome::Sent => &self.total_sent,
            DispatchOutcome::UserNotFound => &self.user_not_found,
            DispatchOutcome::ProviderError => &self.provider_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Snapshot of dispatch statistics
#[derive(Debug, Clone, Serialize)]
pub struct DispatchStatsSnapshot {
    pub registrations: u64,
    pub user_sends: u64,
    pub topic_sends: u64,
    pub total_sent: u64,
    pub user_not_found: u64,
    pub provider_errors: u64,
}

/// Resolves notification targets and hands messages to the push provider.
///
/// Reads the registry but never mutates it outside of `register`.
pub struct DispatchService {
    registry: Arc<dyn TokenStore>,
    provider: Arc<dyn PushProvider>,
    defaults: DispatchConfig,
    stats: DispatchStats,
}

impl DispatchService {
    /// Create a dispatch service with the default routing metadata
    pub fn new(registry: Arc<dyn TokenStore>, provider: Arc<dyn PushProvider>) -> Self {
        Self::with_defaults(registry, provider, DispatchConfig::default())
    }

    /// Create a dispatch service with configured routing metadata
    pub fn with_defaults(
        registry: Arc<dyn TokenStore>,
        provider: Arc<dyn PushProvider>,
        defaults: DispatchConfig,
    ) -> Self {
        Self {
            registry,
            provider,
            defaults,
            stats: DispatchStats::default(),
        }
    }

    /// Get dispatch statistics
    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn registered_users(&self) -> usize {
        self.registry.len()
    }

    /// Bind `user_id` to a device token, replacing any previous token
    pub fn register(&self, user_id: &str, address: &str) -> Result<(), DispatchError> {
        self.registry.register(user_id, address)?;
        self.stats.registrations.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Dispatch an intent to its target
    pub async fn dispatch(
        &self,
        intent: NotificationIntent,
    ) -> Result<DispatchResult, DispatchError> {
        match intent.target.clone() {
            NotificationTarget::User(user_id) => {
                self.send_to_user(&user_id, &intent.title, &intent.body, intent.data).await
            }
            NotificationTarget::Topic(topic) => {
                self.send_to_topic(&topic, &intent.title, &intent.body, intent.data).await
            }
        }
    }

    /// Send a notification to the device registered for `user_id`.
    ///
    /// An unregistered user yields `UserNotFound` without contacting the provider.
    #[tracing::instrument(name = "dispatch.send_to_user", skip(self, title, body, data))]
    pub async fn send_to_user(
        &self,
        user_id: &str,
        title: &str,
        body: &str,
        data: HashMap<String, String>,
    ) -> Result<DispatchResult, DispatchError> {
        NotificationIntent::to_user(user_id, title, body).validate()?;
        self.stats.user_sends.fetch_add(1, Ordering::Relaxed);

        let Some(address) = self.registry.lookup(user_id) else {
            tracing::info!(user_id = %user_id, "User has no registered token");
            let result = DispatchResult::user_not_found();
            return Ok(self.finish(NotificationTarget::User(user_id.to_string()), result));
        };

        let message = PushMessage {
            target: PushTarget::Token(address),
            title: title.to_string(),
            body: body.to_string(),
            data: merge_data(&self.defaults.user_data, data),
        };

        let result = self.deliver(&message).await;
        Ok(self.finish(NotificationTarget::User(user_id.to_string()), result))
    }

    /// Send a notification to every subscriber of `topic`.
    ///
    /// Topic membership lives entirely with the provider; the registry is not consulted.
    #[tracing::instrument(name = "dispatch.send_to_topic", skip(self, title, body, data))]
    pub async fn send_to_topic(
        &self,
        topic: &str,
        title: &str,
        body: &str,
        data: HashMap<String, String>,
    ) -> Result<DispatchResult, DispatchError> {
        NotificationIntent::to_topic(topic, title, body).validate()?;
        self.stats.topic_sends.fetch_add(1, Ordering::Relaxed);

        let message = PushMessage {
            target: PushTarget::Topic(topic.to_string()),
            title: title.to_string(),
            body: body.to_string(),
            data: merge_data(&self.defaults.topic_data, data),
        };

        let result = self.deliver(&message).await;
        Ok(self.finish(NotificationTarget::Topic(topic.to_string()), result))
    }

    /// Invoke the provider exactly once; failures are reported, never retried
    async fn deliver(&self, message: &PushMessage) -> DispatchResult {
        let start = Instant::now();
        let outcome = self.provider.send(message).await;
        DispatchMetrics::observe_provider_latency(start.elapsed());

        match outcome {
            Ok(message_id) => DispatchResult::sent(message_id),
            Err(e) => {
                tracing::error!(
                    provider = self.provider.name(),
                    error = %e,
                    "Push provider failed to send message"
                );
                DispatchResult::provider_error(e.to_string())
            }
        }
    }

    fn finish(&self, target: NotificationTarget, result: DispatchResult) -> DispatchResult {
        self.stats.record_outcome(result.outcome);
        DispatchMetrics::record_outcome(target.kind(), result.outcome.as_str());

        if let Some(ref message_id) = result.provider_message_id {
            tracing::info!(
                target_kind = target.kind(),
                recipient = ?target,
                message_id = %message_id,
                "Notification sent"
            );
        }

        result
    }
}

/// Overlay caller-supplied metadata on the configured defaults
fn merge_data(
    defaults: &HashMap<String, String>,
    overrides: HashMap<String, String>,
) -> HashMap<String, String> {
    let mut data = defaults.clone();
    data.extend(overrides);
    data
}
