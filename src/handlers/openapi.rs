//! OpenAPI specification generation and app factory.

use crate::{
    context::AppContext,
    handlers::{analytics, get_metrics, health, index, not_found, weather},
    middleware::{CorsHeaders, MetricsMiddleware, RequestIdMiddleware, json_error_handlers},
    models::ErrorResponse,
};
use actix_web::{App, HttpResponse, body::MessageBody, error::InternalError};
use paperclip::actix::{OpenApiExt, web};
use paperclip::v2::models::{DefaultApiRaw, Info};

/// Creates the OpenAPI specification served at `/api/spec/v2`
pub fn create_openapi_spec() -> DefaultApiRaw {
    DefaultApiRaw {
        info: Info {
            title: "Weather Relay".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: Some(
                "Relays coordinate queries to the Open-Meteo forecast API and tracks request analytics.\n\n\
                ## Weather\n\
                `GET /api/weather?latitude=..&longitude=..[&timezone=..]` returns the provider document unchanged \
                apart from two added fields:\n\
                - `server_timestamp`: ISO-8601 time the response was produced\n\
                - `server_info`: `{ instance, hostname }` of the serving instance\n\
                \n\
                Invalid coordinates produce `400 {error}`. Provider failures produce \
                `500 {error, details, timestamp}`. Requests are never retried.\n\
                \n\
                ## Analytics\n\
                `GET /api/analytics` returns `totalRequests` and the ten most popular locations, \
                bucketed by rounding both coordinates to two decimal places.\n\
                \n\
                **Configuration:**\n\
                - `PORT` (default 8080), `INSTANCE_NAME` (default `weather-app`)\n\
                - `WEATHER_API_BASE_URL`, `WEATHER_API_TIMEOUT_SECONDS` (default 10)"
                    .into(),
            ),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates the application with all routes, middleware and shared state
///
/// Every call registers the same shared components from `context`, so the
/// factory can be handed to `HttpServer::new` for each worker. Tests use it
/// directly with `actix_web::test::init_service`.
pub fn create_app(
    context: AppContext,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let query_config = actix_web::web::QueryConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse {
            error: format!("Invalid query string: {err}"),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    App::new()
        .wrap(json_error_handlers())
        .wrap(CorsHeaders::new(context.cors.clone()))
        .wrap(RequestIdMiddleware)
        .wrap(MetricsMiddleware)
        .wrap_api_with_spec(create_openapi_spec())
        .app_data(query_config)
        .app_data(context.server.clone())
        .app_data(context.telemetry.clone())
        .app_data(context.metrics.clone())
        .app_data(context.analytics.clone())
        .app_data(context.proxy.clone())
        .service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/api/analytics").route(web::get().to(analytics)))
        .service(web::resource("/api/weather").route(web::get().to(weather)))
        .service(web::resource("/api/metrics").route(web::get().to(get_metrics)))
        .with_json_spec_at("/api/spec/v2")
        .build()
        .default_service(actix_web::web::to(not_found))
}
