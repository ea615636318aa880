//! Builds a [`JwrapConfig`] from built-in defaults, an optional TOML file
//! and `JWRAP_*` environment overrides, later layers winning.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::JwrapConfig;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "JWRAP_";

/// Separates section and key in an override name.
pub const ENV_SEPARATOR: &str = "__";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file passed with `--config` does not exist.
    #[error("config file not found: {0}")]
    NotFound(String),
    /// A layer failed to parse or does not fit the schema.
    #[error("configuration error: {0}")]
    Load(String),
}

/// Loads the endpoint configuration.
///
/// An explicit `config_path` must exist; figment would otherwise skip it
/// and the server would start on defaults. Overrides are named
/// `JWRAP_<SECTION>__<KEY>`, e.g. `JWRAP_SERVER__PATH=/remote/json` or
/// `JWRAP_ACCESS__DEMO_MODE=true`.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` for a missing file and
/// `ConfigError::Load` when any layer is malformed or names an unknown key.
pub fn load_config(config_path: Option<&str>) -> Result<JwrapConfig, ConfigError> {
    figment(config_path)?
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

fn figment(config_path: Option<&str>) -> Result<Figment, ConfigError> {
    let base = Figment::from(Serialized::defaults(JwrapConfig::default()));
    let with_file = match config_path {
        Some(path) if !Path::new(path).is_file() => {
            return Err(ConfigError::NotFound(path.to_string()))
        }
        Some(path) => base.merge(Toml::file(path)),
        None => base,
    };
    Ok(with_file.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR)))
}
