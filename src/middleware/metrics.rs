//! HTTP request metrics middleware.

use crate::{
    config::TelemetryConfig,
    services::AppMetrics,
    utils::route::{UNMATCHED_ROUTE, extract_route_pattern},
};
use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use std::{
    future::{Ready, ready},
    pin::Pin,
    time::Instant,
};

/// Records per-route request counts, durations and the in-flight gauge.
///
/// Nothing is recorded when `TelemetryConfig::metrics_enabled` is off.
/// Requests that fail inside the inner service are recorded with the status
/// their error would render as.
pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsService { service }))
    }
}

pub struct MetricsService<S> {
    service: S,
}

fn collector(req: &ServiceRequest) -> Option<web::Data<AppMetrics>> {
    let enabled = req
        .app_data::<web::Data<TelemetryConfig>>()
        .is_none_or(|config| config.metrics_enabled);

    enabled
        .then(|| req.app_data::<web::Data<AppMetrics>>().cloned())
        .flatten()
}

impl<S, B> Service<ServiceRequest> for MetricsService<S>
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
        let Some(metrics) = collector(&req) else {
            return Box::pin(self.service.call(req));
        };

        let in_flight = metrics.start_request();
        let method: Method = req.method().clone();
        let started = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            drop(in_flight);

            // Routing has run by now, so the matched pattern is available
            let (route, status) = match &result {
                Ok(res) => (extract_route_pattern(res.request()), res.status()),
                Err(err) => (
                    UNMATCHED_ROUTE.to_string(),
                    err.as_response_error().status_code(),
                ),
            };

            metrics.record_request(method.as_str(), &route, status.as_u16(), started.elapsed());
            metrics.update_uptime();

            result
        })
    }
}
