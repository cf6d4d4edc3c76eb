//! Health check endpoint handler.

use crate::{models::HealthResponse, services::AnalyticsReporter, utils::iso_timestamp};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Health check endpoint
///
/// Returns the current health status along with the number of weather
/// requests served and the process uptime in seconds. This endpoint can be
/// used by load balancers and orchestrator health checks.
#[api_v2_operation(
    summary = "Health Check Endpoint",
    description = "Returns the health status, request count and uptime of the relay in JSON format.",
    tags("Health"),
    responses(
        (status = 200, description = "Successful response", body = HealthResponse)
    )
)]
pub async fn health(req: HttpRequest) -> Result<web::Json<HealthResponse>, Error> {
    let (requests, uptime) = req
        .app_data::<web::Data<AnalyticsReporter>>()
        .map(|reporter| (reporter.total_requests(), reporter.uptime().as_secs_f64()))
        .unwrap_or((0, 0.0));

    Ok(web::Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: iso_timestamp(),
        requests,
        uptime,
    }))
}
