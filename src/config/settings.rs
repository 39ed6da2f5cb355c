use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub otel: OtelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
}

/// Push delivery provider selection and credentials
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Provider kind: "fcm" or "log"
    #[serde(default = "default_provider_kind")]
    pub kind: String,
    /// Firebase project ID (fcm only)
    pub project_id: Option<String>,
    /// Pre-issued OAuth2 access token (fcm only)
    pub access_token: Option<String>,
    /// Base URL of the FCM HTTP v1 API
    #[serde(default = "default_provider_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub timeout_ms: u64,
}

/// Routing metadata attached to outgoing messages unless the caller overrides it
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_user_data")]
    pub user_data: HashMap<String, String>,
    #[serde(default = "default_topic_data")]
    pub topic_data: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_provider_kind() -> String {
    "log".to_string()
}

fn default_provider_endpoint() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_provider_timeout_ms() -> u64 {
    10_000 // 10 seconds
}

fn default_user_data() -> HashMap<String, String> {
    HashMap::from([("screen".to_string(), "chat".to_string())])
}

fn default_topic_data() -> HashMap<String, String> {
    HashMap::from([("screen".to_string(), "auction".to_string())])
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "push-gateway".to_string()
}

fn default_sampling_ratio() -> f64 {
    1.0
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8081)?
            .set_default("provider.kind", "log")?
            .set_default("provider.timeout_ms", 10_000)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__PORT, API__KEY, PROVIDER__KIND, PROVIDER__PROJECT_ID, etc.
            // Double underscore separates sections since field names contain "_".
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            project_id: None,
            access_token: None,
            endpoint: default_provider_endpoint(),
            timeout_ms: default_provider_timeout_ms(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            user_data: default_user_data(),
            topic_data: default_topic_data(),
        }
    }
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
        }
    }
}
