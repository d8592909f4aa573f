//! Configuration loading from disk.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `storage.bucket`.
pub const ENV_BUCKET: &str = "OBJECT_GATEWAY_BUCKET";

/// Environment variable overriding `storage.endpoint`.
pub const ENV_ENDPOINT: &str = "OBJECT_GATEWAY_ENDPOINT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration.
///
/// Reads the TOML file when a path is given, otherwise starts from defaults.
/// Environment overrides (`OBJECT_GATEWAY_BUCKET`, `OBJECT_GATEWAY_ENDPOINT`)
/// are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(bucket) = env::var(ENV_BUCKET) {
        config.storage.bucket = bucket;
    }
    if let Ok(endpoint) = env::var(ENV_ENDPOINT) {
        config.storage.endpoint = endpoint;
    }
}
