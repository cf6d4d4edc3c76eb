//! Fallback handler for unmatched routes.

use crate::middleware::not_found_body;
use actix_web::{HttpRequest, HttpResponse};

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::debug!(path = %req.path(), method = %req.method(), "No route matched");
    HttpResponse::NotFound().json(not_found_body(req.path()))
}
