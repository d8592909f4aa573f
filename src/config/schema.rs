//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the object gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backing object store the gateway reads from.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Object store configuration.
///
/// The bucket identity is process-wide: every request reads from the same
/// bucket, and the setting cannot change without a restart.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base URL of the S3-compatible store (e.g., "http://127.0.0.1:9000").
    pub endpoint: String,

    /// Bucket to serve objects from.
    pub bucket: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9000".to_string(),
            bucket: "objects".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout towards storage, in seconds.
    pub connect_secs: u64,

    /// Time budget for producing a response (headers), in seconds.
    /// Deliberately generous: body streaming of large objects is not
    /// bounded by this value.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 900,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = GatewayConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.storage.bucket, "objects");
        assert_eq!(config.timeouts.connect_secs, 5);
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [storage]
            bucket = "reports"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.bucket, "reports");
        assert_eq!(config.storage.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn full_toml_round_trips() {
        let config = GatewayConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: GatewayConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.storage.endpoint, config.storage.endpoint);
        assert_eq!(parsed.timeouts.request_secs, config.timeouts.request_secs);
    }
}
