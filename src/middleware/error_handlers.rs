//! JSON bodies for responses the handlers never produced themselves.

use crate::{
    models::{InternalErrorResponse, NotFoundResponse},
    utils::iso_timestamp,
};
use actix_web::{
    HttpResponse, Result,
    dev::ServiceResponse,
    http::{StatusCode, header},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
};

/// Error handler middleware for the whole app
///
/// - 405 on a known path becomes the regular not-found body.
/// - 500 without a JSON body becomes a generic internal error. The cause is
///   logged but never returned to the client.
pub fn json_error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new()
        .handler(StatusCode::METHOD_NOT_ALLOWED, render_not_found)
        .handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error)
}

/// Body for any request that matched no route
pub fn not_found_body(path: &str) -> NotFoundResponse {
    NotFoundResponse {
        error: "Not found".to_string(),
        path: path.to_string(),
        timestamp: iso_timestamp(),
    }
}

fn render_not_found<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let body = not_found_body(req.path());
    let res = ServiceResponse::new(req, HttpResponse::NotFound().json(body));

    Ok(ErrorHandlerResponse::Response(res.map_into_right_body()))
}

fn render_internal_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if is_json(&res) {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    match res.response().error() {
        Some(err) => tracing::error!(path = %res.request().path(), error = %err, "Server error"),
        None => tracing::error!(path = %res.request().path(), "Server error"),
    }

    let (req, _) = res.into_parts();
    let res = ServiceResponse::new(
        req,
        HttpResponse::InternalServerError().json(InternalErrorResponse {
            error: "Internal server error".to_string(),
            timestamp: iso_timestamp(),
        }),
    );

    Ok(ErrorHandlerResponse::Response(res.map_into_right_body()))
}

fn is_json<B>(res: &ServiceResponse<B>) -> bool {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
