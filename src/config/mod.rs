mod settings;

pub use settings::{
    ApiConfig, DispatchConfig, OtelConfig, ProviderConfig, ServerConfig, Settings,
};
