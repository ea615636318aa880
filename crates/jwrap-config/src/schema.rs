//! Configuration schema types.

use serde::{Deserialize, Serialize};

/// Top-level jwrap configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JwrapConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Dispatch core settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Access gate settings.
    #[serde(default)]
    pub access: AccessConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Route of the endpoint.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_path() -> String {
    "/json".to_string()
}

/// Dispatch core configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Keys every request must carry besides `method`.
    #[serde(default)]
    pub required_keys: Vec<String>,
    /// Selectors answered with the method catalog (case-insensitive).
    #[serde(default = "default_discovery_aliases")]
    pub discovery_aliases: Vec<String>,
    /// Strip markup from string argument values.
    #[serde(default = "default_true")]
    pub sanitize_values: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            required_keys: Vec::new(),
            discovery_aliases: default_discovery_aliases(),
            sanitize_values: true,
        }
    }
}

fn default_discovery_aliases() -> Vec<String> {
    vec!["map".into(), "methods".into(), "wsdl".into()]
}
fn default_true() -> bool {
    true
}

/// Access gate configuration, checked before any dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Whether the remote API is enabled at all.
    #[serde(default = "default_true")]
    pub remote_api_allowed: bool,
    /// Demo installations refuse every call.
    #[serde(default)]
    pub demo_mode: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            remote_api_allowed: true,
            demo_mode: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "jwrap_dispatch=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
