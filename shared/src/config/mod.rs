//! Configuration module
//!
//! - `auth` - JWT secret/algorithm, token lifetimes, bcrypt cost
//! - `environment` - Environment detection and logging configuration
//!
//! Settings are loaded once at startup through the `config` crate: an optional
//! `config/default` file, then an optional per-environment file, then the
//! process environment (after `.env` has been read by `dotenvy`).

pub mod auth;
pub mod environment;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthSettings, DEFAULT_JWT_SECRET, MAX_LIFETIME_HOURS, SUPPORTED_ALGORITHMS};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Failed to initialise tracing: {message}")]
    Telemetry { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Authentication settings
    pub auth: AuthSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            auth: AuthSettings::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = Environment::from_env();

        let source = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(env.config_file()).required(false))
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        Self::from_source(source)
    }

    /// Build configuration from an already assembled source
    ///
    /// Recognised keys: `environment`, the [`AuthSettings`] fields, and the
    /// optional `log_level` / `log_format` overrides.
    pub fn from_source(source: config::Config) -> Result<Self, ConfigError> {
        let environment = match source.get_string("environment") {
            Ok(value) => value
                .parse()
                .map_err(|message| ConfigError::Invalid { message })?,
            Err(config::ConfigError::NotFound(_)) => Environment::default(),
            Err(e) => return Err(e.into()),
        };

        let auth: AuthSettings = source.clone().try_deserialize()?;
        auth.validate()
            .map_err(|message| ConfigError::Invalid { message })?;

        if auth.is_using_default_secret() {
            if environment.is_production() {
                return Err(ConfigError::Invalid {
                    message: "JWT_SECRET must be set in production".to_string(),
                });
            }
            tracing::warn!("JWT_SECRET not set, using the development default");
        }

        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = source.get_string("log_level") {
            logging.level = level;
        }
        if let Ok(format) = source.get_string("log_format") {
            logging.format = format
                .parse()
                .map_err(|message| ConfigError::Invalid { message })?;
        }

        Ok(Self {
            environment,
            auth,
            logging,
        })
    }
}
