//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("showdown.server_url must be a ws:// or wss:// url, got '{0}'")]
    InvalidServerUrl(String),
    #[error("limits.outbound_queue must be at least 1")]
    EmptyOutboundQueue,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    let url = &config.showdown.server_url;
    if !(url.starts_with("ws://") || url.starts_with("wss://")) {
        errors.push(ValidationError::InvalidServerUrl(url.clone()));
    }

    if config.limits.outbound_queue == 0 {
        errors.push(ValidationError::EmptyOutboundQueue);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
