//! Handler configuration and its resolution from the environment

use super::environment::{EnvLookup, LAMBDA_ENV_LOG_FORMAT, LAMBDA_ENV_LOG_LEVEL};
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Record type written to the `type` field unless configured otherwise
pub const DEFAULT_LOG_TYPE: &str = "app.log";

/// Immutable settings a handler renders with
///
/// Each option has an independent effect:
/// - `level`: records below it are not enabled
/// - `format`: JSON or flattened text
/// - `include_source`: adds a `source` group with function, file and line
/// - `log_type`: value of the `type` field; empty disables the field
/// - `omit_time`: drops the `time` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub level: LogLevel,
    pub format: OutputFormat,
    pub include_source: bool,
    pub log_type: String,
    pub omit_time: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::INFO,
            format: OutputFormat::Text,
            include_source: false,
            log_type: DEFAULT_LOG_TYPE.to_string(),
            omit_time: false,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl HandlerConfig {
    /// Defaults with level and format taken from `AWS_LAMBDA_LOG_LEVEL` and
    /// `AWS_LAMBDA_LOG_FORMAT`.
    ///
    /// Missing or unrecognized values fall back to `INFO` and text.
    pub fn from_env(env: &dyn EnvLookup) -> Self {
        Self {
            level: LogLevel::from_name(&env.lookup(LAMBDA_ENV_LOG_LEVEL).unwrap_or_default()),
            format: OutputFormat::from_name(&env.lookup(LAMBDA_ENV_LOG_FORMAT).unwrap_or_default()),
            ..Self::default()
        }
    }

    /// Whether `level` passes the configured threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default() {
        let config = HandlerConfig::default();
        assert_eq!(config.level, LogLevel::INFO);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_type, "app.log");
        assert!(!config.include_source);
        assert!(!config.omit_time);
    }

    #[test]
    fn test_from_env() {
        let config = HandlerConfig::from_env(&env(&[
            (LAMBDA_ENV_LOG_LEVEL, "DEBUG"),
            (LAMBDA_ENV_LOG_FORMAT, "JSON"),
        ]));
        assert_eq!(config.level, LogLevel::DEBUG);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_from_env_falls_back_silently() {
        let config = HandlerConfig::from_env(&env(&[
            (LAMBDA_ENV_LOG_LEVEL, "loud"),
            (LAMBDA_ENV_LOG_FORMAT, "xml"),
        ]));
        assert_eq!(config.level, LogLevel::INFO);
        assert_eq!(config.format, OutputFormat::Text);

        let config = HandlerConfig::from_env(&env(&[]));
        assert_eq!(config, HandlerConfig::default());
    }

    #[test]
    fn test_enabled() {
        let config = HandlerConfig {
            level: LogLevel::WARN,
            ..HandlerConfig::default()
        };
        assert!(!config.enabled(LogLevel::INFO));
        assert!(config.enabled(LogLevel::WARN));
        assert!(config.enabled(LogLevel::WARN.offset(1)));
        assert!(config.enabled(LogLevel::FATAL));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HandlerConfig =
            serde_json::from_str(r#"{"level":"warn","format":"json","log_type":""}"#).unwrap();
        assert_eq!(config.level, LogLevel::WARN);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_type, "");
        assert!(!config.omit_time);
    }
}
