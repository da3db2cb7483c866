//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, LogFormat, LoggingConfig};

/// Install the global tracing subscriber described by `config`
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ConfigError::Telemetry {
            message: e.to_string(),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| ConfigError::Telemetry {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn test_init_tracing_only_installs_once() {
        let config = LoggingConfig::for_environment(Environment::Development);
        let _ = init_tracing(&config);

        let second = init_tracing(&config);
        assert!(matches!(second, Err(ConfigError::Telemetry { .. })));
    }
}
