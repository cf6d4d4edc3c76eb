//! Logging and metrics configuration.

use std::env;

/// Output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Configuration for logging output and metrics collection
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub metrics_enabled: bool,
    pub log_format: LogFormat,
    /// Filter directives used when `RUST_LOG` is unset
    pub default_log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            log_format: LogFormat::Pretty,
            default_log_filter: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let metrics_enabled = env::var("METRICS_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let log_format = env::var("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Pretty);

        Self {
            metrics_enabled,
            log_format,
            default_log_filter: "info".to_string(),
        }
    }
}
