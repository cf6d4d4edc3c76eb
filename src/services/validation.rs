//! Coordinate validation for weather queries.

use crate::models::{CoordinateQuery, DEFAULT_TIMEZONE};

/// Reasons a coordinate query is rejected. Always caused by the client.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required parameters: latitude and longitude")]
    MissingParameter,

    #[error("Invalid latitude or longitude values")]
    NotANumber,

    #[error("Latitude must be between -90 and 90 degrees")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180 degrees")]
    LongitudeOutOfRange,
}

/// Validate raw latitude, longitude and timezone query values.
///
/// Empty values count as absent. Both coordinates are checked for presence
/// and parsed before either range is checked.
pub fn validate(
    raw_latitude: Option<&str>,
    raw_longitude: Option<&str>,
    raw_timezone: Option<&str>,
) -> Result<CoordinateQuery, ValidationError> {
    let (Some(raw_latitude), Some(raw_longitude)) =
        (present(raw_latitude), present(raw_longitude))
    else {
        return Err(ValidationError::MissingParameter);
    };

    let (Some(latitude), Some(longitude)) = (parse_degrees(raw_latitude), parse_degrees(raw_longitude))
    else {
        return Err(ValidationError::NotANumber);
    };

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange);
    }

    let timezone = present(raw_timezone).unwrap_or(DEFAULT_TIMEZONE).to_string();

    Ok(CoordinateQuery {
        latitude,
        longitude,
        timezone,
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_degrees(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
