//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use push_gateway::provider::{ProviderError, PushMessage, PushProvider};
use push_gateway::registry::{RegistryError, TokenRegistry, TokenStore};

/// Provider that records every message and answers with a fixed result
pub struct RecordingProvider {
    sent: Mutex<Vec<PushMessage>>,
    failure: Option<String>,
    message_id: String,
}

impl RecordingProvider {
    pub fn succeeding(message_id: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            failure: None,
            message_id: message_id.to_string(),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
            message_id: String::new(),
        })
    }

    pub fn calls(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PushProvider for RecordingProvider {
    async fn send(&self, message: &PushMessage) -> Result<String, ProviderError> {
        self.sent.lock().unwrap().push(message.clone());

        match &self.failure {
            Some(msg) => Err(ProviderError::Rejected {
                status: 400,
                message: msg.clone(),
            }),
            None => Ok(self.message_id.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Registry wrapper that counts lookups
#[derive(Default)]
pub struct CountingRegistry {
    inner: TokenRegistry,
    lookups: AtomicUsize,
}

impl CountingRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingRegistry {
    fn register(&self, user_id: &str, address: &str) -> Result<(), RegistryError> {
        self.inner.register(user_id, address)
    }

    fn lookup(&self, user_id: &str) -> Option<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(user_id)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
