use dashmap::DashMap;

use crate::metrics::RegistryMetrics;

use super::{token_suffix, Registration, RegistryError, TokenStore};

/// In-memory token registry.
///
/// DashMap shards its locks, so registrations for different users rarely
/// contend and a reader only ever sees whole entries.
#[derive(Default)]
pub struct TokenRegistry {
    /// user_id -> address
    entries: DashMap<String, String>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl TokenStore for TokenRegistry {
    fn register(&self, user_id: &str, address: &str) -> Result<(), RegistryError> {
        let Registration { user_id, address } = Registration::new(user_id, address)?;

        let suffix = token_suffix(&address);
        let replaced = self.entries.insert(user_id.clone(), address).is_some();

        RegistryMetrics::record_registration(replaced);
        RegistryMetrics::set_registered_users(self.entries.len());

        tracing::info!(
            user_id = %user_id,
            token_suffix = %suffix,
            replaced = replaced,
            "User registered"
        );

        Ok(())
    }

    fn lookup(&self, user_id: &str) -> Option<String> {
        self.entries.get(user_id).map(|r| r.value().clone())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
