use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::registry::RegistryError;

/// Errors that reject a dispatch request before anything is sent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{0}")]
    InvalidArgument(String),
}

impl From<RegistryError> for DispatchError {
    fn from(e: RegistryError) -> Self {
        DispatchError::InvalidArgument(e.to_string())
    }
}

/// Who receives a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    /// A registered application user, resolved through the registry
    User(String),
    /// A provider-managed topic
    Topic(String),
}

impl NotificationTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationTarget::User(_) => "user",
            NotificationTarget::Topic(_) => "topic",
        }
    }
}

/// A notification to send, built per request and discarded after dispatch
#[derive(Debug, Clone)]
pub struct NotificationIntent {
    pub title: String,
    pub body: String,
    pub target: NotificationTarget,
    /// Routing metadata, merged over the configured defaults
    pub data: HashMap<String, String>,
}

impl NotificationIntent {
    pub fn new(
        target: NotificationTarget,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            target,
            data: HashMap::new(),
        }
    }

    pub fn to_user(
        user_id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::new(NotificationTarget::User(user_id.into()), title, body)
    }

    pub fn to_topic(
        topic: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::new(NotificationTarget::Topic(topic.into()), title, body)
    }

    /// Check required fields are present
    pub fn validate(&self) -> Result<(), DispatchError> {
        let (field, value) = match &self.target {
            NotificationTarget::User(user_id) => ("target_user_id", user_id),
            NotificationTarget::Topic(topic) => ("topic", topic),
        };

        if value.is_empty() {
            return Err(DispatchError::InvalidArgument(format!("{} must not be empty", field)));
        }
        if self.title.is_empty() {
            return Err(DispatchError::InvalidArgument("title must not be empty".into()));
        }
        if self.body.is_empty() {
            return Err(DispatchError::InvalidArgument("body must not be empty".into()));
        }

        Ok(())
    }
}

/// Outcome of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent,
    UserNotFound,
    ProviderError,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Sent => "sent",
            DispatchOutcome::UserNotFound => "user_not_found",
            DispatchOutcome::ProviderError => "provider_error",
        }
    }
}

/// Result of a dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub outcome: DispatchOutcome,
    /// Provider-assigned ID, only present when sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    /// Provider error detail, only present on provider failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn sent(provider_message_id: impl Into<String>) -> Self {
        Self {
            outcome: DispatchOutcome::Sent,
            provider_message_id: Some(provider_message_id.into()),
            error: None,
        }
    }

    pub fn user_not_found() -> Self {
        Self {
            outcome: DispatchOutcome::UserNotFound,
            provider_message_id: None,
            error: None,
        }
    }

    pub fn provider_error(detail: impl Into<String>) -> Self {
        Self {
            outcome: DispatchOutcome::ProviderError,
            provider_message_id: None,
            error: Some(detail.into()),
        }
    }

    pub fn is_sent(&self) -> bool {
        self.outcome == DispatchOutcome::Sent
    }
}
