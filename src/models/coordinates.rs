//! Validated coordinate query and location bucketing.

use serde::{Deserialize, Serialize};

/// Timezone sent upstream when the client does not name one
pub const DEFAULT_TIMEZONE: &str = "auto";

/// A latitude/longitude pair that passed validation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl CoordinateQuery {
    /// Bucket key used for popularity tracking.
    ///
    /// Both coordinates are rounded to two decimal places, so
    /// `40.7128,-74.0060` and `40.7149,-74.0051` share `"40.71,-74.01"`.
    ///
    /// Rounding works on the exact decimal value of the `f64`, with ties
    /// going away from zero. `2.675` is stored as `2.67499...` and so buckets
    /// as `2.67`, while the exact tie `0.125` buckets as `0.13`.
    pub fn location_key(&self) -> String {
        format!(
            "{},{}",
            format_hundredths(self.latitude),
            format_hundredths(self.longitude)
        )
    }
}

fn format_hundredths(value: f64) -> String {
    // `{:.2}` rounds the exact value but breaks exact ties to even. Exact ties
    // at the third decimal are odd multiples of 1/8, where `value * 100.0`
    // is itself exact.
    let eighths = value * 8.0;
    let value = if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        (value * 100.0).round() / 100.0
    } else {
        value
    };

    let formatted = format!("{value:.2}");
    match formatted.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(latitude: f64, longitude: f64) -> CoordinateQuery {
        CoordinateQuery {
            latitude,
            longitude,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }

    #[test]
    fn test_location_key_rounding() {
        assert_eq!(query(40.7128, -74.0060).location_key(), "40.71,-74.01");
        assert_eq!(query(51.5, -0.12).location_key(), "51.50,-0.12");
        assert_eq!(query(90.0, 180.0).location_key(), "90.00,180.00");
    }

    #[test]
    fn test_location_key_ignores_extra_precision() {
        assert_eq!(
            query(40.71281234, -74.00601234).location_key(),
            query(40.7128, -74.006).location_key()
        );
    }

    #[test]
    fn test_location_key_exact_ties_round_away_from_zero() {
        assert_eq!(query(0.125, -0.125).location_key(), "0.13,-0.13");
        assert_eq!(query(0.625, -0.625).location_key(), "0.63,-0.63");
        assert_eq!(query(10.375, -170.875).location_key(), "10.38,-170.88");
    }

    #[test]
    fn test_location_key_uses_stored_binary_value() {
        // None of these literals is exactly representable; each is stored
        // just below the written `5`
        let keys: Vec<_> = [1.005, 1.015, 1.025, 2.675]
            .into_iter()
            .map(|lat| query(lat, 0.0).location_key())
            .collect();
        assert_eq!(keys, vec!["1.00,0.00", "1.01,0.00", "1.02,0.00", "2.67,0.00"]);
    }

    #[test]
    fn test_location_key_normalises_negative_zero() {
        assert_eq!(query(-0.001, -0.004).location_key(), "0.00,0.00");
        assert_eq!(query(-0.0, 0.0).location_key(), "0.00,0.00");
        assert_eq!(query(-0.006, -0.01).location_key(), "-0.01,-0.01");
    }
}
