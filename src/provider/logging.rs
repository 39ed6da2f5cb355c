use async_trait::async_trait;
use uuid::Uuid;

use super::{ProviderError, PushMessage, PushProvider};

/// Provider that records messages in the log instead of delivering them.
///
/// Used for local development when no FCM credentials are available.
#[derive(Debug, Default)]
pub struct LogProvider;

impl LogProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushProvider for LogProvider {
    async fn send(&self, message: &PushMessage) -> Result<String, ProviderError> {
        let message_id = format!("log-{}", Uuid::new_v4());

        tracing::info!(
            message_id = %message_id,
            recipient = ?message.target,
            title = %message.title,
            data = ?message.data,
            "Push message (not delivered)"
        );

        Ok(message_id)
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
