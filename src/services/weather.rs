//! Weather proxy: validates coordinates, calls the upstream provider and
//! enriches its response with server metadata.

use crate::{
    config::UpstreamConfig,
    models::{CoordinateQuery, ErrorResponse, ServerInfo, UpstreamErrorResponse, WeatherQuery},
    services::{
        analytics::RequestCounter,
        location_tracker::LocationTracker,
        metrics::AppMetrics,
        validation::{ValidationError, validate},
    },
    utils::iso_timestamp,
};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use reqwest::Client;
use serde_json::{Map, Value};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info, warn};
use url::Url;

/// Current-conditions variables requested from the provider
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,surface_pressure,wind_speed_10m,wind_direction_10m,uv_index";

/// Daily aggregate variables requested from the provider
pub const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Upstream JSON document with the enrichment fields added
pub type WeatherResponse = Map<String, Value>;

/// Errors produced while proxying a weather request
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Weather API responded with status: {0}")]
    UpstreamHttp(u16),

    #[error("{0}")]
    UpstreamApi(String),

    #[error("Weather API request failed: {0}")]
    UpstreamUnreachable(String),

    #[error("Weather API request timed out after {0}s")]
    UpstreamTimeout(u64),

    #[error("Failed to parse weather data: {0}")]
    UpstreamDecode(String),

    #[error("Invalid weather API URL: {0}")]
    InvalidUpstreamUrl(String),
}

impl ProxyError {
    /// Label used for the upstream outcome metric
    fn outcome(&self) -> &'static str {
        match self {
            ProxyError::InvalidInput(_) => "invalid_input",
            ProxyError::UpstreamHttp(_) => "http_error",
            ProxyError::UpstreamApi(_) => "api_error",
            ProxyError::UpstreamUnreachable(_) => "unreachable",
            ProxyError::UpstreamTimeout(_) => "timeout",
            ProxyError::UpstreamDecode(_) => "decode_error",
            ProxyError::InvalidUpstreamUrl(_) => "invalid_url",
        }
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ProxyError::InvalidInput(e) => HttpResponse::BadRequest().json(ErrorResponse {
                error: e.to_string(),
            }),
            _ => HttpResponse::InternalServerError().json(UpstreamErrorResponse {
                error: "Failed to fetch weather data".to_string(),
                details: self.to_string(),
                timestamp: iso_timestamp(),
            }),
        }
    }
}

/// Proxy between API clients and the upstream weather provider
pub struct WeatherProxy {
    client: Client,
    config: UpstreamConfig,
    server_info: ServerInfo,
    requests: Arc<RequestCounter>,
    tracker: Arc<LocationTracker>,
    metrics: Option<AppMetrics>,
}

impl WeatherProxy {
    /// Create a proxy sharing the given request counter and location tracker
    pub fn new(
        config: UpstreamConfig,
        server_info: ServerInfo,
        requests: Arc<RequestCounter>,
        tracker: Arc<LocationTracker>,
        metrics: Option<AppMetrics>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            config,
            server_info,
            requests,
            tracker,
            metrics,
        })
    }

    /// Handle one weather request end to end.
    ///
    /// The request is counted before validation, so rejected queries still
    /// show up in the totals. Only validated queries are recorded as
    /// locations or sent upstream.
    pub async fn handle(&self, params: &WeatherQuery) -> Result<WeatherResponse, ProxyError> {
        self.requests.increment();

        let query = validate(
            params.latitude.as_deref(),
            params.longitude.as_deref(),
            params.timezone.as_deref(),
        )
        .inspect_err(|e| debug!(error = %e, "Rejected weather query"))?;

        self.tracker.record(&query);
        if let Some(metrics) = &self.metrics {
            metrics.set_tracked_locations(self.tracker.len());
        }

        let url = self.forecast_url(&query)?;
        info!(
            latitude = query.latitude,
            longitude = query.longitude,
            timezone = %query.timezone,
            "Fetching weather data"
        );

        let start = Instant::now();
        let result = self.fetch(url).await;
        let duration = start.elapsed();

        if let Some(metrics) = &self.metrics {
            let outcome = result.as_ref().map_or_else(ProxyError::outcome, |_| "success");
            metrics.record_upstream(outcome, duration);
        }

        match result {
            Ok(body) => Ok(self.enrich(body)),
            Err(e) => {
                error!(
                    latitude = query.latitude,
                    longitude = query.longitude,
                    duration_ms = duration.as_millis(),
                    error = %e,
                    "Error fetching weather data"
                );
                Err(e)
            }
        }
    }

    /// Build the provider URL for a validated query
    pub fn forecast_url(&self, query: &CoordinateQuery) -> Result<Url, ProxyError> {
        let endpoint = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));
        let mut url =
            Url::parse(&endpoint).map_err(|e| ProxyError::InvalidUpstreamUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("latitude", &query.latitude.to_string())
            .append_pair("longitude", &query.longitude.to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("daily", DAILY_FIELDS)
            .append_pair("timezone", &query.timezone);

        Ok(url)
    }

    /// Single GET against the provider, mapped onto `ProxyError`
    async fn fetch(&self, url: Url) -> Result<Map<String, Value>, ProxyError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Weather API returned non-success status");
            return Err(ProxyError::UpstreamHttp(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ProxyError::UpstreamDecode(e.to_string()))?;

        match body {
            Value::Object(map) => {
                check_api_error(&map)?;
                Ok(map)
            }
            other => Err(ProxyError::UpstreamDecode(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ProxyError {
        if e.is_timeout() {
            ProxyError::UpstreamTimeout(self.config.timeout_seconds)
        } else {
            ProxyError::UpstreamUnreachable(e.to_string())
        }
    }

    /// Add `server_timestamp` and `server_info` to an upstream document
    pub fn enrich(&self, mut body: Map<String, Value>) -> WeatherResponse {
        body.insert("server_timestamp".to_string(), Value::String(iso_timestamp()));
        body.insert(
            "server_info".to_string(),
            serde_json::json!({
                "instance": self.server_info.instance,
                "hostname": self.server_info.hostname,
            }),
        );
        body
    }
}

/// Providers may answer 200 with `{"error": true, "reason": "..."}`
fn check_api_error(body: &Map<String, Value>) -> Result<(), ProxyError> {
    if body.get("error").and_then(Value::as_bool) != Some(true) {
        return Ok(());
    }

    let reason = body
        .get("reason")
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
        .unwrap_or("API returned an error");

    Err(ProxyError::UpstreamApi(reason.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
