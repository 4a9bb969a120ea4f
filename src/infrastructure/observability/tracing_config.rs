use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: Environment,
    /// Default filter directives, used when `RUST_LOG` is unset.
    pub filter: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// `LOG_FORMAT=json` forces JSON output regardless of the settings file.
    pub fn from_settings(logging: &LoggingSettings, environment: Environment) -> Self {
        let json_from_env = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            environment,
            filter: logging.level.clone(),
            json_format: logging.enable_json || json_from_env,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_settings(&LoggingSettings::default(), Environment::Local)
    }
}
