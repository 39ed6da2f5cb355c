//! Request and response models for the HTTP API

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing metadata map
fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request to bind a user to a device token
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    /// Provider device token
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Request to notify a single registered user
#[derive(Debug, Deserialize)]
pub struct SendUserRequest {
    pub target_user_id: String,
    pub title: String,
    pub body: String,
    /// Optional routing metadata, overrides configured defaults per key
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct SendUserResponse {
    pub status: &'static str,
    pub target_user: String,
    pub message_id: String,
}

/// Request to notify every subscriber of a topic
#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    pub topic: String,
    pub title: String,
    pub body: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub status: &'static str,
    pub topic: String,
    pub message_id: String,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}
