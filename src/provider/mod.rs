//! Push delivery providers.
//!
//! The dispatch service only sees the `PushProvider` capability. Concrete
//! adapters:
//!
//! - `FcmProvider`: Firebase Cloud Messaging HTTP v1 API
//! - `LogProvider`: logs messages instead of delivering them (development)
//!
//! Use `create_provider()` to build the adapter selected in configuration.

mod fcm;
mod logging;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::ProviderConfig;

pub use fcm::FcmProvider;
pub use logging::LogProvider;

/// Errors reported by a push provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider cannot be constructed from the given configuration
    #[error("Provider configuration error: {0}")]
    Config(String),

    /// Transport-level failure (connect, timeout, TLS)
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Backend answered with a body we could not understand
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Where a push message is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PushTarget {
    /// A single device, by its provider token
    Token(String),
    /// All subscribers of a provider-managed topic
    Topic(String),
}

/// A fully resolved message handed to the provider
#[derive(Debug, Clone, Serialize)]
pub struct PushMessage {
    pub target: PushTarget,
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

/// Capability to deliver a push message.
///
/// Returns the provider-assigned message identifier on success.
#[async_trait]
pub trait PushProvider: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<String, ProviderError>;

    /// Short provider name for logs and health output
    fn name(&self) -> &'static str;
}

/// Create a push provider based on configuration.
///
/// - `"fcm"`: `FcmProvider`, requires `project_id` and `access_token`
/// - `"log"`: `LogProvider`
///
/// Fails on unknown kinds or incomplete credentials; the service must not
/// start without a working provider.
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn PushProvider>, ProviderError> {
    match config.kind.as_str() {
        "fcm" => {
            let provider = FcmProvider::from_config(config)?;
            tracing::info!(
                provider = "fcm",
                endpoint = %config.endpoint,
                timeout_ms = config.timeout_ms,
                "Creating FCM push provider"
            );
            Ok(Arc::new(provider))
        }
        "log" => {
            tracing::warn!(
                provider = "log",
                "Creating log push provider, messages will not be delivered"
            );
            Ok(Arc::new(LogProvider::new()))
        }
        other => Err(ProviderError::Config(format!(
            "unknown provider kind '{}'",
            other
        ))),
    }
}
