//! Weather proxy integration tests against a mock upstream provider.

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};
use std::time::Duration;
use weather_relay::{
    AppContext, CorsConfig, ServerConfig, TelemetryConfig, UpstreamConfig, create_app,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A trimmed Open-Meteo forecast document
fn forecast_body() -> Value {
    json!({
        "latitude": 40.710335,
        "longitude": -73.99307,
        "timezone": "America/New_York",
        "current_units": {"temperature_2m": "°C"},
        "current": {
            "time": "2024-06-01T12:00",
            "temperature_2m": 22.4,
            "relative_humidity_2m": 61,
            "apparent_temperature": 23.1,
            "weather_code": 2,
            "surface_pressure": 1012.3,
            "wind_speed_10m": 11.2,
            "wind_direction_10m": 205,
            "uv_index": 6.1
        },
        "daily": {
            "time": ["2024-06-01"],
            "weather_code": [3],
            "temperature_2m_max": [25.0],
            "temperature_2m_min": [17.2],
            "precipitation_sum": [0.4]
        }
    })
}

fn context_for(server: &MockServer, upstream: UpstreamConfig) -> AppContext {
    AppContext::new(
        ServerConfig {
            instance_name: "relay-test".to_string(),
            hostname: "test-host".to_string(),
            ..ServerConfig::default()
        },
        UpstreamConfig {
            base_url: format!("{}/v1", server.uri()),
            ..upstream
        },
        TelemetryConfig::default(),
        CorsConfig::default(),
    )
    .expect("Failed to build context")
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let json: Value = test::read_body_json(resp).await;
        (status, json)
    }};
}

#[actix_web::test]
async fn test_weather_success_is_enriched_and_tracked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "40.7128"))
        .and(query_param("longitude", "-74.006"))
        .and(query_param("timezone", "auto"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,surface_pressure,wind_speed_10m,wind_direction_10m,uv_index",
        ))
        .and(query_param(
            "daily",
            "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    let (status, body) = get_json!(&app, "/api/weather?latitude=40.7128&longitude=-74.0060");
    assert_eq!(status, StatusCode::OK);

    // Upstream fields pass through untouched
    let mut upstream_fields = body.as_object().unwrap().clone();
    let timestamp = upstream_fields.remove("server_timestamp").unwrap();
    let server_info = upstream_fields.remove("server_info").unwrap();
    assert_eq!(Value::Object(upstream_fields), forecast_body());

    assert!(timestamp.as_str().unwrap().ends_with('Z'));
    assert_eq!(
        server_info,
        json!({"instance": "relay-test", "hostname": "test-host"})
    );

    let (_, analytics) = get_json!(&app, "/api/analytics");
    assert_eq!(analytics["totalRequests"], 1);
    assert_eq!(
        analytics["popularLocations"],
        json!([{"location": "40.71,-74.01", "count": 1}])
    );
}

#[actix_web::test]
async fn test_weather_timezone_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "Europe/Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"timezone": "Europe/Berlin"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    let (status, body) =
        get_json!(&app, "/api/weather?latitude=52.52&longitude=13.41&timezone=Europe%2FBerlin");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timezone"], "Europe/Berlin");
}

#[actix_web::test]
async fn test_repeated_locations_are_ranked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    for uri in [
        "/api/weather?latitude=51.5074&longitude=-0.1278",
        "/api/weather?latitude=40.7128&longitude=-74.0060",
        "/api/weather?latitude=40.7131&longitude=-74.0061",
        "/api/weather?latitude=40.71&longitude=-74.01",
    ] {
        let (status, _) = get_json!(&app, uri);
        assert_eq!(status, StatusCode::OK, "{uri}");
    }

    let (_, analytics) = get_json!(&app, "/api/analytics");
    assert_eq!(analytics["totalRequests"], 4);
    assert_eq!(
        analytics["popularLocations"],
        json!([
            {"location": "40.71,-74.01", "count": 3},
            {"location": "51.51,-0.13", "count": 1}
        ])
    );
}

#[actix_web::test]
async fn test_concurrent_requests_are_all_counted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    let request = || {
        test::TestRequest::get()
            .uri("/api/weather?latitude=35.6762&longitude=139.6503")
            .to_request()
    };
    let (a, b, c) = tokio::join!(
        test::call_service(&app, request()),
        test::call_service(&app, request()),
        test::call_service(&app, request()),
    );
    for resp in [a, b, c] {
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let (_, analytics) = get_json!(&app, "/api/analytics");
    assert_eq!(analytics["totalRequests"], 3);
    assert_eq!(analytics["popularLocations"][0]["count"], 3);
}

#[actix_web::test]
async fn test_upstream_error_status_surfaces_as_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    let (status, body) = get_json!(&app, "/api/weather?latitude=40.7128&longitude=-74.0060");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert!(body["details"].as_str().unwrap().contains("503"));
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_upstream_api_error_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "reason": "Cannot initialize WeatherVariable from invalid String value"
        })))
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    let (status, body) = get_json!(&app, "/api/weather?latitude=1&longitude=2");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["details"],
        "Cannot initialize WeatherVariable from invalid String value"
    );
    assert!(body.get("server_info").is_none());
}

#[actix_web::test]
async fn test_upstream_non_object_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    let (status, body) = get_json!(&app, "/api/weather?latitude=1&longitude=2");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse weather data"));
}

#[actix_web::test]
async fn test_upstream_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig {
            timeout_seconds: 1,
            ..UpstreamConfig::default()
        },
    )))
    .await;

    let (status, body) = get_json!(&app, "/api/weather?latitude=1&longitude=2");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Weather API request timed out after 1s");
}

#[actix_web::test]
async fn test_upstream_unreachable() {
    let app = test::init_service(create_app(
        AppContext::with_upstream("http://127.0.0.1:1").unwrap(),
    ))
    .await;

    let (status, body) = get_json!(&app, "/api/weather?latitude=1&longitude=2");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch weather data");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Weather API request failed"));

    // The location was still recorded before the upstream call
    let (_, analytics) = get_json!(&app, "/api/analytics");
    assert_eq!(analytics["popularLocations"][0]["location"], "1.00,2.00");
}

#[actix_web::test]
async fn test_invalid_input_never_reaches_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    for uri in [
        "/api/weather",
        "/api/weather?latitude=invalid&longitude=invalid",
        "/api/weather?latitude=91&longitude=0",
        "/api/weather?latitude=0&longitude=-181",
    ] {
        let (status, body) = get_json!(&app, uri);
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string());
    }

    let (_, analytics) = get_json!(&app, "/api/analytics");
    assert_eq!(analytics["totalRequests"], 4);
    assert_eq!(analytics["popularLocations"], json!([]));
}

#[actix_web::test]
async fn test_upstream_metrics_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let app = test::init_service(create_app(context_for(
        &mock_server,
        UpstreamConfig::default(),
    )))
    .await;

    get_json!(&app, "/api/weather?latitude=1&longitude=2");

    let req = test::TestRequest::get().uri("/api/metrics").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).unwrap();

    assert!(body_str.contains("weather_upstream_requests_total{outcome=\"http_error\"} 1"));
    assert!(body_str.contains("weather_tracked_locations 1"));
}
