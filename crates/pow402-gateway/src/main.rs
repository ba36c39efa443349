use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pow402_gateway::{
    config::GatewayConfig, coordinator::HttpCoordinator, metrics::register_metrics, routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    let port = config.port;

    tracing::info!("Starting pow402-gateway on port {}", port);
    tracing::info!("Serving static content from: {}", config.www_dir);
    tracing::info!("Coordinator URL: {}", config.coordinator_url);
    tracing::info!(
        "Free endpoints: {}, share history capacity: {}, paywall multiplier: {}",
        config.free_endpoints.len(),
        config.share_history_capacity,
        config.paywall_multiplier
    );

    let coordinator = Arc::new(HttpCoordinator::new(&config.coordinator_url));
    let state = AppState::new(config, coordinator);

    // Push the paywall difficulty policy to the coordinator; its calls
    // block, so keep them off the async runtime.
    {
        let state = state.clone();
        tokio::task::spawn_blocking(move || state.configure_coordinator())
            .await
            .map_err(std::io::Error::other)?;
    }

    // Register Prometheus metrics
    register_metrics();

    let state_data = web::Data::new(state);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(1024 * 1024)) // 1MB body limit
            .wrap(Logger::default())
            .configure(routes::health::configure)
            .configure(routes::subscribe::configure)
            .configure(routes::work::configure)
            .default_service(web::to(routes::paywall::gated))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
