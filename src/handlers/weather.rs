//! Weather endpoint handler.

use crate::{models::WeatherQuery, services::WeatherProxy};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use paperclip::actix::api_v2_operation;

/// Weather endpoint
///
/// Proxies current conditions and a daily forecast for the given coordinates
/// from the upstream provider, adding `server_timestamp` and `server_info`.
#[api_v2_operation(
    summary = "Weather Forecast Endpoint",
    description = "Returns current conditions and daily aggregates for ?latitude=..&longitude=.. (optional &timezone=.., default auto). The provider response is passed through with server_timestamp and server_info added.",
    tags("Weather"),
    responses(
        (status = 200, description = "Upstream forecast with server metadata"),
        (status = 400, description = "Bad Request - Missing or invalid coordinates"),
        (status = 500, description = "Internal Server Error - Weather provider failure")
    )
)]
pub async fn weather(req: HttpRequest, query: web::Query<WeatherQuery>) -> HttpResponse {
    let Some(proxy) = req.app_data::<web::Data<WeatherProxy>>() else {
        return HttpResponse::InternalServerError().finish();
    };

    match proxy.handle(&query).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => e.error_response(),
    }
}
