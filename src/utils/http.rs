//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;

/// Extract the client IP address
///
/// Uses the first address in `X-Forwarded-For` or `X-Real-IP` when a proxy
/// set one, otherwise the connection peer address.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for header_name in ["X-Forwarded-For", "X-Real-IP"] {
        let forwarded = req
            .headers()
            .get(header_name)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
