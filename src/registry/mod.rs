//! Token registry: the user → device token mapping.
//!
//! The registry is volatile by design of the service. Clients re-register
//! after a restart, so nothing here is persisted.
//!
//! - `TokenStore`: the capability consumed by the dispatch service
//! - `TokenRegistry`: in-memory implementation backed by DashMap (default)

mod memory;

use thiserror::Error;

pub use memory::TokenRegistry;

/// Number of trailing token characters that may appear in logs
const VISIBLE_TOKEN_SUFFIX: usize = 10;

/// Errors returned when a registration is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("user_id must not be empty")]
    EmptyUserId,

    #[error("token must not be empty")]
    EmptyAddress,
}

/// A single user → address binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub user_id: String,
    pub address: String,
}

impl Registration {
    /// Validate and build a registration
    pub fn new(user_id: &str, address: &str) -> Result<Self, RegistryError> {
        if user_id.is_empty() {
            return Err(RegistryError::EmptyUserId);
        }
        if address.is_empty() {
            return Err(RegistryError::EmptyAddress);
        }

        Ok(Self {
            user_id: user_id.to_string(),
            address: address.to_string(),
        })
    }
}

/// Storage for user → address bindings.
///
/// Implementations must be safe for concurrent use: a lookup never observes a
/// partially written entry, and concurrent registrations for the same user
/// resolve last-write-wins.
pub trait TokenStore: Send + Sync {
    /// Insert or overwrite the address bound to `user_id`
    fn register(&self, user_id: &str, address: &str) -> Result<(), RegistryError>;

    /// Resolve the current address for `user_id`
    fn lookup(&self, user_id: &str) -> Option<String>;

    /// Number of users with a registered address
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Trailing part of a token, safe to write into logs
pub fn token_suffix(token: &str) -> String {
    let count = token.chars().count();
    token
        .chars()
        .skip(count.saturating_sub(VISIBLE_TOKEN_SUFFIX))
        .collect()
}
