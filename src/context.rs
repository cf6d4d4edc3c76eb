//! Shared application state.
//!
//! One `AppContext` is built before the server starts and cloned into every
//! worker, so all workers count into the same analytics.

use crate::{
    config::{CorsConfig, ServerConfig, TelemetryConfig, UpstreamConfig},
    models::ServerInfo,
    services::{AnalyticsReporter, AppMetrics, LocationTracker, RequestCounter, WeatherProxy},
};
use actix_web::web;
use std::sync::Arc;

/// Errors raised while assembling the application state
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Failed to create metrics registry: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl From<ContextError> for std::io::Error {
    fn from(err: ContextError) -> Self {
        std::io::Error::other(err)
    }
}

/// Handles to every shared component, ready to register as app data
#[derive(Clone)]
pub struct AppContext {
    pub server: web::Data<ServerConfig>,
    pub telemetry: web::Data<TelemetryConfig>,
    pub cors: CorsConfig,
    pub metrics: web::Data<AppMetrics>,
    pub analytics: web::Data<AnalyticsReporter>,
    pub proxy: web::Data<WeatherProxy>,
}

impl AppContext {
    pub fn new(
        server: ServerConfig,
        upstream: UpstreamConfig,
        telemetry: TelemetryConfig,
        cors: CorsConfig,
    ) -> Result<Self, ContextError> {
        let metrics = AppMetrics::new()?;
        let requests = Arc::new(RequestCounter::new());
        let tracker = Arc::new(LocationTracker::new());

        let server_info = ServerInfo {
            instance: server.instance_name.clone(),
            hostname: server.hostname.clone(),
        };

        let proxy = WeatherProxy::new(
            upstream,
            server_info,
            Arc::clone(&requests),
            Arc::clone(&tracker),
            telemetry.metrics_enabled.then(|| metrics.clone()),
        )?;

        Ok(Self {
            server: web::Data::new(server),
            telemetry: web::Data::new(telemetry),
            cors,
            metrics: web::Data::new(metrics),
            analytics: web::Data::new(AnalyticsReporter::new(requests, tracker)),
            proxy: web::Data::new(proxy),
        })
    }

    /// Build the context from environment variables
    pub fn from_env() -> Result<Self, ContextError> {
        Self::new(
            ServerConfig::from_env(),
            UpstreamConfig::from_env(),
            TelemetryConfig::from_env(),
            CorsConfig::from_env(),
        )
    }

    /// Context pointing at the given upstream base URL, with default settings
    /// otherwise. Used by tests and local tooling.
    pub fn with_upstream(base_url: &str) -> Result<Self, ContextError> {
        Self::new(
            ServerConfig::default(),
            UpstreamConfig {
                base_url: base_url.to_string(),
                ..UpstreamConfig::default()
            },
            TelemetryConfig::default(),
            CorsConfig::default(),
        )
    }
}
