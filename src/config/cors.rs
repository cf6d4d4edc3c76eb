//! Cross-origin resource sharing configuration.

use actix_web::http::header::HeaderValue;
use std::env;
use tracing::warn;

/// Headers attached to every response so the dashboard can be served from
/// a different origin than the API.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET,HEAD,PUT,PATCH,POST,DELETE".to_string(),
            allow_headers: "Content-Type, X-Request-ID".to_string(),
        }
    }
}

impl CorsConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            allow_origin: header_var("CORS_ALLOW_ORIGIN", defaults.allow_origin),
            allow_methods: header_var("CORS_ALLOW_METHODS", defaults.allow_methods),
            allow_headers: header_var("CORS_ALLOW_HEADERS", defaults.allow_headers),
        }
    }
}

/// Read a header value from the environment, keeping the default when the
/// variable is unset, blank, or not a legal header value
fn header_var(name: &str, default: String) -> String {
    let Some(value) = env::var(name).ok().filter(|v| !v.trim().is_empty()) else {
        return default;
    };

    if HeaderValue::from_str(&value).is_err() {
        warn!(variable = name, value = %value.escape_debug(), "Invalid header value, using default");
        return default;
    }

    value
}
