//! Registration and notification handlers

use axum::{extract::State, Json};

use crate::dispatch::{DispatchOutcome, DispatchResult};
use crate::error::{AppError, Result};
use crate::server::AppState;

use super::extract::JsonBody;
use super::models::{
    BroadcastRequest, BroadcastResponse, PingResponse, RegisterRequest, RegisterResponse,
    SendUserRequest, SendUserResponse,
};

/// GET /ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}

/// POST /register - bind a user to a device token
#[tracing::instrument(
    name = "http.register",
    skip(state, request),
    fields(user_id = %request.user_id)
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    state.dispatcher.register(&request.user_id, &request.token)?;

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
    }))
}

/// POST /send-user - notify a single registered user
#[tracing::instrument(
    name = "http.send_user",
    skip(state, request),
    fields(target_user_id = %request.target_user_id)
)]
pub async fn send_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SendUserRequest>,
) -> Result<Json<SendUserResponse>> {
    let result = state
        .dispatcher
        .send_to_user(
            &request.target_user_id,
            &request.title,
            &request.body,
            request.data,
        )
        .await?;

    let not_found = || {
        AppError::NotFound(format!(
            "User ID '{}' is not registered",
            request.target_user_id
        ))
    };
    let message_id = sent_message_id(result, not_found)?;

    Ok(Json(SendUserResponse {
        status: "sent",
        target_user: request.target_user_id,
        message_id,
    }))
}

/// POST /broadcast - notify every subscriber of a topic
#[tracing::instrument(
    name = "http.broadcast",
    skip(state, request),
    fields(topic = %request.topic)
)]
pub async fn broadcast(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<BroadcastRequest>,
) -> Result<Json<BroadcastResponse>> {
    let result = state
        .dispatcher
        .send_to_topic(&request.topic, &request.title, &request.body, request.data)
        .await?;

    let unexpected = || AppError::Internal("topic send reported a missing user".to_string());
    let message_id = sent_message_id(result, unexpected)?;

    Ok(Json(BroadcastResponse {
        status: "broadcast_sent",
        topic: request.topic,
        message_id,
    }))
}

/// Map a dispatch result to the provider message ID or the matching API error
fn sent_message_id(
    result: DispatchResult,
    not_found: impl FnOnce() -> AppError,
) -> Result<String> {
    match result.outcome {
        DispatchOutcome::Sent => result
            .provider_message_id
            .ok_or_else(|| AppError::Internal("provider returned no message id".to_string())),
        DispatchOutcome::UserNotFound => Err(not_found()),
        DispatchOutcome::ProviderError => Err(AppError::Provider(
            result.error.unwrap_or_else(|| "unknown provider error".to_string()),
        )),
    }
}
