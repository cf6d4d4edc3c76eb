use actix_web::HttpServer;
use tracing::info;
use weather_relay::{AppContext, TelemetryConfig, create_app, telemetry::init_tracing};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let telemetry = TelemetryConfig::from_env();
    if let Err(e) = init_tracing(&telemetry) {
        eprintln!("Failed to initialise logging: {e}");
    }

    let context = AppContext::from_env()?;
    let server = context.server.clone();

    info!(
        port = server.port,
        instance = %server.instance_name,
        hostname = %server.hostname,
        environment = %server.environment,
        "Weather relay starting"
    );
    info!("Health check available at: http://localhost:{}/health", server.port);
    info!("Analytics available at: http://localhost:{}/api/analytics", server.port);

    // actix-web stops gracefully on SIGINT/SIGTERM
    HttpServer::new(move || create_app(context.clone()))
        .bind(server.listen_addr())?
        .run()
        .await?;

    info!("Weather relay stopped");
    Ok(())
}
