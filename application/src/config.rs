//! [`Config`]-related definitions.

use std::path::PathBuf;

use common::Coordinates;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Catalog configuration.
    #[serde(default)]
    pub catalog: Catalog,

    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Search configuration.
    #[serde(default)]
    pub search: Search,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Venue catalog configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Catalog {
    /// Path to the JSON file with venues and their bookings.
    #[default(PathBuf::from("catalog.json"))]
    pub path: PathBuf,
}

/// Service configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret verifying session tokens.
    ///
    /// Tokens are only decoded, not verified, if it's not set.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    pub jwt_secret: Option<SecretString>,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service { jwt_secret } = value;
        Self {
            jwt_decoding_key: jwt_secret.map(|s| {
                jsonwebtoken::DecodingKey::from_secret(
                    s.expose_secret().as_bytes(),
                )
            }),
        }
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Search {
    /// [`Coordinates`] to measure distances from, when none are provided
    /// with a search.
    pub origin: Option<Coordinates>,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Config, Service};

    #[test]
    fn defaults_without_file() {
        let config = Config::new("/nonexistent/config").unwrap();

        assert_eq!(config.catalog.path.to_str(), Some("catalog.json"));
        assert!(config.service.jwt_secret.is_none());
        assert_eq!(config.search.origin, None);
        assert_eq!(
            tracing::Level::from(config.log.level),
            tracing::Level::WARN,
        );
    }

    #[test]
    fn verifies_tokens_only_with_secret() {
        let unverified = service::Config::from(Service::default());
        assert!(unverified.jwt_decoding_key.is_none());

        let verified = service::Config::from(Service {
            jwt_secret: Some("secret".to_owned().into()),
        });
        assert!(verified.jwt_decoding_key.is_some());
    }
}
