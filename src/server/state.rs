use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::dispatch::DispatchService;
use crate::provider::PushProvider;
use crate::registry::{TokenRegistry, TokenStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<DispatchService>,
    pub start_time: Instant,
}

impl AppState {
    /// Build state with a fresh in-memory registry and the given provider
    pub fn new(settings: Settings, provider: Arc<dyn PushProvider>) -> Self {
        let registry: Arc<dyn TokenStore> = Arc::new(TokenRegistry::new());
        let dispatcher = Arc::new(DispatchService::with_defaults(
            registry,
            provider,
            settings.dispatch.clone(),
        ));

        Self::with_dispatcher(settings, dispatcher)
    }

    /// Build state around an existing dispatch service
    pub fn with_dispatcher(settings: Settings, dispatcher: Arc<DispatchService>) -> Self {
        Self {
            settings: Arc::new(settings),
            dispatcher,
            start_time: Instant::now(),
        }
    }
}
