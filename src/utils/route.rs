//! Route pattern extraction utilities.

use actix_web::HttpRequest;

/// Label for requests that matched no registered route
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Registered route pattern for a request, for use as a metrics label.
///
/// Unmatched paths collapse into a single label so arbitrary URLs cannot
/// grow the label set.
pub fn extract_route_pattern(req: &HttpRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}
