//! Upstream weather provider configuration.

use std::{env, time::Duration};

/// Default Open-Meteo API root. The forecast endpoint is appended to it.
pub const DEFAULT_WEATHER_API_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Configuration for the upstream weather provider client
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Whole-request timeout (in seconds)
    pub timeout_seconds: u64,
    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_API_BASE_URL.to_string(),
            timeout_seconds: 10,
            connect_timeout_seconds: 5,
        }
    }
}

impl UpstreamConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base_url = env::var("WEATHER_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WEATHER_API_BASE_URL.to_string());

        let timeout_seconds = env::var("WEATHER_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(10);

        let connect_timeout_seconds = env::var("WEATHER_API_CONNECT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(5);

        Self {
            base_url,
            timeout_seconds,
            connect_timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}
