//! Firebase Cloud Messaging (HTTP v1) adapter.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;

use super::{ProviderError, PushMessage, PushProvider, PushTarget};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
    notification: FcmNotification<'a>,
    #[serde(skip_serializing_if = "is_empty_data")]
    data: &'a HashMap<String, String>,
}

fn is_empty_data(data: &&HashMap<String, String>) -> bool {
    data.is_empty()
}

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    message: String,
}

/// FCM HTTP v1 client.
///
/// Takes an already issued OAuth2 access token; acquiring and refreshing
/// it belongs to the deployment.
pub struct FcmProvider {
    client: reqwest::Client,
    send_url: String,
    access_token: String,
}

impl FcmProvider {
    pub fn new(
        endpoint: &str,
        project_id: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            send_url: format!(
                "{}/v1/projects/{}/messages:send",
                endpoint.trim_end_matches('/'),
                project_id
            ),
            access_token: access_token.into(),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ProviderError::Config("provider.project_id is required for fcm".into())
            })?;
        let access_token = config
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ProviderError::Config("provider.access_token is required for fcm".into())
            })?;

        Self::new(
            &config.endpoint,
            project_id,
            access_token,
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn send_url(&self) -> &str {
        &self.send_url
    }
}

fn build_request(message: &PushMessage) -> SendRequest<'_> {
    let (token, topic) = match &message.target {
        PushTarget::Token(token) => (Some(token.as_str()), None),
        PushTarget::Topic(topic) => (None, Some(topic.as_str())),
    };

    SendRequest {
        message: FcmMessage {
            token,
            topic,
            notification: FcmNotification {
                title: &message.title,
                body: &message.body,
            },
            data: &message.data,
        },
    }
}

/// Pull the human readable reason out of an FCM error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl PushProvider for FcmProvider {
    #[tracing::instrument(
        name = "fcm.send",
        skip(self, message),
        fields(recipient = ?message.target)
    )]
    async fn send(&self, message: &PushMessage) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&build_request(message))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let reason = error_message(&body);
            tracing::warn!(status = status.as_u16(), error = %reason, "FCM rejected message");
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                message: reason,
            });
        }

        let parsed: SendResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(parsed.name)
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
