//! API request and response models.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
    /// ISO-8601 time the response was produced
    pub timestamp: String,
    /// Weather requests received since startup
    pub requests: u64,
    /// Seconds since startup
    pub uptime: f64,
}

/// Raw query parameters for the weather endpoint
///
/// Values stay as strings so that validation can tell a missing value from
/// one that is not a number.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct WeatherQuery {
    /// Latitude in decimal degrees, -90 to 90
    pub latitude: Option<String>,
    /// Longitude in decimal degrees, -180 to 180
    pub longitude: Option<String>,
    /// IANA timezone name, or "auto"
    pub timezone: Option<String>,
}

impl WeatherQuery {
    pub fn new(latitude: &str, longitude: &str) -> Self {
        Self {
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            timezone: None,
        }
    }
}

/// Metadata describing the instance that served a weather response
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct ServerInfo {
    pub instance: String,
    pub hostname: String,
}

/// A single entry in the popular locations ranking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub struct LocationCount {
    /// Rounded "lat,lng" bucket, e.g. "40.71,-74.01"
    pub location: String,
    pub count: u64,
}

/// Response model for the analytics endpoint
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub total_requests: u64,
    pub popular_locations: Vec<LocationCount>,
}

/// Error body for rejected client input
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error body for failed upstream calls
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct UpstreamErrorResponse {
    pub error: String,
    pub details: String,
    pub timestamp: String,
}

/// Error body for unmatched routes
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct NotFoundResponse {
    pub error: String,
    pub path: String,
    pub timestamp: String,
}

/// Error body for faults that must not leak internal detail
#[derive(Clone, Debug, Serialize, Deserialize, Apiv2Schema)]
pub struct InternalErrorResponse {
    pub error: String,
    pub timestamp: String,
}
