//! # Telemetry
//!
//! Installs the global `tracing` subscriber.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` when set, otherwise `config.level`.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if the level is not a valid
/// filter directive.
pub fn env_filter(config: &LoggingConfig) -> ApplicationResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            ApplicationError::configuration(format!(
                "invalid log level '{}': {e}",
                config.level
            ))
        }),
    }
}

/// Installs a fmt subscriber, plain or JSON.
///
/// # Errors
///
/// Returns `ApplicationError::Configuration` if the filter is invalid or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> ApplicationResult<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ApplicationError::configuration(format!("tracing init failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_rejected_when_rust_log_unset() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "marketplace_rfq=verbose".to_string(),
            json: false,
        };
        assert!(env_filter(&config).is_err());
    }

    #[test]
    fn valid_level_builds_filter() {
        let config = LoggingConfig {
            level: "marketplace_rfq=debug".to_string(),
            json: true,
        };
        assert!(env_filter(&config).is_ok());
    }
}
