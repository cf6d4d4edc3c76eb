//! Analytics endpoint handler.

use crate::{models::AnalyticsSnapshot, services::AnalyticsReporter};
use actix_web::{Error, HttpRequest, Result, web};
use paperclip::actix::api_v2_operation;

/// Analytics endpoint
///
/// Returns the total number of weather requests and the ten most requested
/// locations since startup.
#[api_v2_operation(
    summary = "Request Analytics Endpoint",
    description = "Returns the total weather request count and the most popular locations, bucketed to two decimal places.",
    tags("Analytics"),
    responses(
        (status = 200, description = "Successful response", body = AnalyticsSnapshot)
    )
)]
pub async fn analytics(req: HttpRequest) -> Result<web::Json<AnalyticsSnapshot>, Error> {
    let reporter = req
        .app_data::<web::Data<AnalyticsReporter>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Analytics not configured"))?;

    Ok(web::Json(reporter.snapshot()))
}
