//! CORS headers middleware implementation.

use crate::config::CorsConfig;
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::{
        Method,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, HeaderMap, HeaderName,
            HeaderValue,
        },
    },
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    rc::Rc,
};
use tracing::warn;

type CorsHeaderSet = Rc<Vec<(HeaderName, HeaderValue)>>;

/// CORS headers middleware factory
///
/// Adds the configured `Access-Control-Allow-*` headers to every response
/// and answers preflight requests with `204 No Content`.
pub struct CorsHeaders {
    config: CorsConfig,
}

impl CorsHeaders {
    /// Create a new CORS middleware with the given configuration
    pub fn new(config: CorsConfig) -> Self {
        Self { config }
    }

    fn header_set(&self) -> CorsHeaderSet {
        let headers = [
            (ACCESS_CONTROL_ALLOW_ORIGIN, &self.config.allow_origin),
            (ACCESS_CONTROL_ALLOW_METHODS, &self.config.allow_methods),
            (ACCESS_CONTROL_ALLOW_HEADERS, &self.config.allow_headers),
        ]
        .into_iter()
        .filter_map(|(name, value)| match HeaderValue::from_str(value) {
            Ok(value) => Some((name, value)),
            Err(_) => {
                warn!(header = %name, value = %value.escape_debug(), "Skipping invalid CORS header value");
                None
            }
        })
        .collect();

        Rc::new(headers)
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsHeadersMiddleware {
            service,
            headers: self.header_set(),
        }))
    }
}

/// The actual CORS headers middleware service
pub struct CorsHeadersMiddleware<S> {
    service: S,
    headers: CorsHeaderSet,
}

fn is_preflight(req: &ServiceRequest) -> bool {
    req.method() == Method::OPTIONS && req.headers().contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}

fn apply(headers: &CorsHeaderSet, target: &mut HeaderMap) {
    for (name, value) in headers.iter() {
        target.insert(name.clone(), value.clone());
    }
}

impl<S, B> Service<ServiceRequest> for CorsHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let headers = Rc::clone(&self.headers);

        if is_preflight(&req) {
            let mut res = req.into_response(HttpResponse::NoContent().finish());
            apply(&headers, res.headers_mut());
            return Box::pin(async move { Ok(res.map_into_right_body()) });
        }

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            apply(&headers, res.headers_mut());
            Ok(res.map_into_left_body())
        })
    }
}
