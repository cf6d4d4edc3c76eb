//! Server and instance configuration.

use std::env;

/// Configuration for the HTTP listener and the instance identity reported
/// in enriched weather responses.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub instance_name: String,
    /// Runtime environment marker, only used for logging.
    pub environment: String,
    pub hostname: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "0.0.0.0".to_string(),
            instance_name: "weather-app".to_string(),
            environment: "development".to_string(),
            hostname: "unknown".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let bind_address = env::var("BIND_ADDRESS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.bind_address);

        let instance_name = env::var("INSTANCE_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.instance_name);

        let environment = env::var("APP_ENV")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.environment);

        Self {
            port,
            bind_address,
            instance_name,
            environment,
            hostname: resolve_hostname(),
        }
    }

    /// Address string suitable for `HttpServer::bind`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Network name of the running machine.
///
/// A non-empty `HOSTNAME` overrides the name reported by the operating
/// system. `"unknown"` is used only when neither yields a name.
pub fn resolve_hostname() -> String {
    hostname_from(
        env::var("HOSTNAME").ok(),
        Some(gethostname::gethostname().to_string_lossy().into_owned()),
    )
}

fn hostname_from(env_value: Option<String>, system_value: Option<String>) -> String {
    [env_value, system_value]
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
