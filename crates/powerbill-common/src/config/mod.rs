//! Layered configuration loading
//!
//! Sources are merged in increasing priority: serialized defaults, the TOML
//! file (only if it exists), then prefixed environment variables where `__`
//! separates nested keys (`POWERBILL_STORAGE__DATA_FILE`).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Load `T` from defaults, an optional TOML file and `env_prefix` variables.
///
/// A missing file is not an error: the defaults and environment still apply.
pub fn load_layered<T>(defaults: &T, path: Option<&Path>, env_prefix: &str) -> Result<T, ConfigurationError>
where
    T: Serialize + DeserializeOwned,
{
    let mut figment = Figment::from(Serialized::defaults(defaults));

    if let Some(path) = path {
        if path.exists() {
            debug!("Merging configuration file {}", path.display());
            figment = figment.merge(Toml::file(path));
        } else {
            debug!("Configuration file {} not found, using defaults", path.display());
        }
    }

    figment = figment.merge(Env::prefixed(env_prefix).split("__"));

    figment.extract().map_err(|e| ConfigurationError::Extract(Box::new(e)))
}
