//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the storage endpoint is a usable http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "storage.bucket").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a socket address: {:?}", config.listener.bind_address),
        });
    }

    match Url::parse(&config.storage.endpoint) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ValidationError {
                    field: "storage.endpoint".into(),
                    message: format!("scheme must be http or https, got {:?}", url.scheme()),
                });
            }
            if url.host_str().is_none() {
                errors.push(ValidationError {
                    field: "storage.endpoint".into(),
                    message: "missing host".into(),
                });
            }
        }
        Err(e) => {
            errors.push(ValidationError {
                field: "storage.endpoint".into(),
                message: format!("not a URL: {}", e),
            });
        }
    }

    if config.storage.bucket.is_empty() {
        errors.push(ValidationError {
            field: "storage.bucket".into(),
            message: "must not be empty".into(),
        });
    } else if config.storage.bucket.contains('/') {
        errors.push(ValidationError {
            field: "storage.bucket".into(),
            message: "must not contain '/'".into(),
        });
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.connect_secs".into(),
            message: "must be greater than zero".into(),
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".into(),
            message: format!(
                "not a socket address: {:?}",
                config.observability.metrics_address
            ),
        });
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError {
            field: "observability.log_level".into(),
            message: format!(
                "unknown level {:?} (expected one of {:?})",
                config.observability.log_level, LOG_LEVELS
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
