//! Service configuration.
//!
//! Read from a JSON file at startup:
//!
//! ```json
//! {
//!   "listen": "127.0.0.1:8321",
//!   "namespaces": [
//!     {
//!       "id": "amqp",
//!       "uri": "http://schema.wireloom.dev/amqp",
//!       "schemaLocation": "https://schema.wireloom.dev/amqp/wireloom-amqp.xsd"
//!     }
//!   ]
//! }
//! ```
//!
//! The listed namespaces are registered on top of the built-in
//! integration namespace. The file path comes from the first CLI
//! argument, then [`CONFIG_ENV_VAR`], then [`DEFAULT_CONFIG_PATH`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use xml_engine::NamespaceSpec;

/// Config file used when neither a CLI argument nor the environment names one
pub const DEFAULT_CONFIG_PATH: &str = "wireloom.json";

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "WIRELOOM_CONFIG";

fn default_listen() -> String {
    "127.0.0.1:8321".to_string()
}

/// Configuration loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid config document
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The namespace list is empty
    #[error("config must list at least one namespace")]
    NoNamespaces,
}

/// Service configuration as read from the config file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Address the HTTP listener binds
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Namespaces available to flows, beyond the built-in default
    pub namespaces: Vec<NamespaceSpec>,
}

impl ServiceConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        if config.namespaces.is_empty() {
            return Err(ConfigError::NoNamespaces);
        }
        Ok(config)
    }
}

/// Resolve the config path from the first CLI argument, the environment,
/// or the default, in that order
pub fn resolve_config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
        .into()
}
