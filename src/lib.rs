//! Weather Relay - an Actix Web service that proxies coordinate queries to
//! the Open-Meteo forecast API
//!
//! The relay:
//! - validates latitude/longitude/timezone query parameters
//! - forwards valid queries upstream and passes the JSON document through,
//!   adding `server_timestamp` and `server_info`
//! - counts requests and ranks popular locations in memory
//! - exposes health, analytics, Prometheus metrics and an OpenAPI document
//!
//! ## Architecture
//!
//! - `models/` - Request/response models and the validated coordinate query
//! - `services/` - Validation, location tracking, analytics and the proxy
//! - `handlers/` - HTTP request handlers and the app factory
//! - `middleware/` - Request IDs, metrics, CORS and JSON error bodies
//! - `config/` - Configuration structures and environment loading
//! - `utils/` - Request and timestamp helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use weather_relay::{AppContext, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let context = AppContext::from_env()?;
//!     HttpServer::new(move || create_app(context.clone()))
//!         .bind("0.0.0.0:8080")?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod context;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use config::{CorsConfig, LogFormat, ServerConfig, TelemetryConfig, UpstreamConfig};
pub use context::{AppContext, ContextError};
pub use handlers::{
    analytics, create_app, create_openapi_spec, get_metrics, health, index, not_found, weather,
};
pub use middleware::{CorsHeaders, MetricsMiddleware, RequestId, RequestIdMiddleware};
pub use models::{
    AnalyticsSnapshot, CoordinateQuery, ErrorResponse, HealthResponse, LocationCount,
    NotFoundResponse, ServerInfo, UpstreamErrorResponse, WeatherQuery,
};
pub use services::{
    AnalyticsReporter, AppMetrics, LocationTracker, ProxyError, RequestCounter, ValidationError,
    WeatherProxy, WeatherResponse, validate,
};
