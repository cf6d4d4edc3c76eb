//! Request ID middleware for tracing and logging.

use crate::{config::ServerConfig, utils::extract_client_ip};
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Instant,
};
use tracing::Instrument;
use uuid::Uuid;

const X_REQUEST_ID: &str = "x-request-id";

/// Request ID carried in request extensions for handlers that want it
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Request ID middleware factory
///
/// Every request gets a unique ID for tracing purposes. An incoming
/// `X-Request-ID` header is reused, otherwise a new UUID is generated.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

/// The actual request ID middleware service
pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let request_id = incoming_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());

        let (instance, environment) = req
            .app_data::<web::Data<ServerConfig>>()
            .map(|c| (c.instance_name.clone(), c.environment.clone()))
            .unwrap_or_else(|| ("unknown".to_string(), "unknown".to_string()));

        req.extensions_mut().insert(RequestId(request_id.clone()));

        // Everything logged while serving the request carries its ID
        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            instance = %instance,
            environment = %environment,
        );

        span.in_scope(|| {
            tracing::info!(
                method = %req.method(),
                path = %req.path(),
                ip_address = %extract_client_ip(req.request()),
                "Incoming request"
            );
        });

        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(
            async move {
                let mut res = fut.await?;

                if let Ok(value) = HeaderValue::from_str(&request_id) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(X_REQUEST_ID), value);
                }

                tracing::info!(
                    status = res.status().as_u16(),
                    duration_ms = started.elapsed().as_millis(),
                    "Request completed"
                );

                Ok(res)
            }
            .instrument(span),
        )
    }
}

/// Caller-supplied `X-Request-ID`, ignored when empty
fn incoming_request_id(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
