//! Dashboard page handler.

use actix_web::HttpResponse;
use paperclip::actix::api_v2_operation;

const INDEX_HTML: &str = include_str!("../../public/index.html");

#[api_v2_operation(
    summary = "Weather Dashboard",
    description = "Serves the browser dashboard that queries /api/weather.",
    tags("Dashboard"),
    responses(
        (status = 200, description = "HTML page")
    )
)]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}
