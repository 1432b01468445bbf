//! # Configuration
//!
//! Layered settings loaded with the `config` crate, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional `marketplace.toml` in the working directory
//! 3. environment variables prefixed `MARKETPLACE__`, with `__` between
//!    nested keys (for example `MARKETPLACE__RFQ__REQUIRE_QUOTES_FOR_AWARD=true`)
//!
//! A `.env` file, when present, is read into the environment first.
//!
//! ```toml
//! [store]
//! path = "data/marketplace-store.json"
//!
//! [rfq]
//! require_quotes_for_award = false
//! validate_quote_total = true
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use crate::application::error::ApplicationResult;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Base name of the optional settings file.
pub const CONFIG_FILE: &str = "marketplace";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "MARKETPLACE";

/// Default location of the JSON store.
pub const DEFAULT_STORE_PATH: &str = "marketplace-store.json";

/// Where persisted state lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// JSON store file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Rules applied by the RFQ lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RfqPolicy {
    /// Refuse to award an RFQ that has no quotes.
    pub require_quotes_for_award: bool,
    /// Require `total_price == price_per_unit × quantity` on every quote.
    pub validate_quote_total: bool,
}

impl Default for RfqPolicy {
    fn default() -> Self {
        Self {
            require_quotes_for_award: false,
            validate_quote_total: true,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AppConfig {
    /// Store settings.
    pub store: StoreConfig,
    /// RFQ lifecycle rules.
    pub rfq: RfqPolicy,
    /// Logging settings.
    pub logging: LoggingConfig,
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = AppConfig::default();
    Config::builder()
        .set_default("store.path", DEFAULT_STORE_PATH)?
        .set_default(
            "rfq.require_quotes_for_award",
            defaults.rfq.require_quotes_for_award,
        )?
        .set_default("rfq.validate_quote_total", defaults.rfq.validate_quote_total)?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.json", defaults.logging.json)
}

impl AppConfig {
    /// Loads settings from defaults, `marketplace.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if a source is malformed or
    /// a value has the wrong type.
    pub fn load() -> ApplicationResult<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env file");
        }
        let settings = with_defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Loads settings from defaults overlaid with a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the document is
    /// malformed or a value has the wrong type.
    pub fn from_toml_str(toml: &str) -> ApplicationResult<Self> {
        let settings = with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(!config.rfq.require_quotes_for_award);
        assert!(config.rfq.validate_quote_total);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.store.path, PathBuf::from(DEFAULT_STORE_PATH));
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [store]
            path = "/var/lib/marketplace/store.json"

            [rfq]
            require_quotes_for_award = true

            [logging]
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.store.path,
            PathBuf::from("/var/lib/marketplace/store.json")
        );
        assert!(config.rfq.require_quotes_for_award);
        assert!(config.rfq.validate_quote_total);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn wrong_type_is_configuration_error() {
        let err = AppConfig::from_toml_str("[rfq]\nvalidate_quote_total = \"often\"").unwrap_err();
        assert!(matches!(
            err,
            crate::application::error::ApplicationError::Configuration(_)
        ));
    }
}
