mod cache;
mod config;
mod domain;
mod error;
mod handlers;
mod middleware;
mod repositories;
mod routes;
mod services;

use config::AppState;
use routes::create_routes;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Entry point dari MeterMind Admin Service
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging dengan environment
    setup_logging();

    // Create application state (database, cache, services)
    let app_state = AppState::new().await?;

    info!(
        "🚀 Admin Service starting on {}:{}",
        app_state.config.server_host, app_state.config.server_port
    );

    // Build dan start server dengan graceful shutdown
    start_server(app_state).await
}

/// Inisialisasi structured logging berdasarkan environment
fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("admin_service=debug,tower_http=debug")
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Start server dengan graceful shutdown
async fn start_server(app_state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!(
        "{}:{}",
        app_state.config.server_host, app_state.config.server_port
    );

    let app = create_routes(app_state);

    let listener = TcpListener::bind(&addr).await?;

    info!("🌐 Server running on http://{}", addr);
    info!("📚 API Docs: http://{}/docs", addr);
    info!("🏥 Health Check: http://{}/health", addr);

    // Setup graceful shutdown signal handler
    let shutdown_signal = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("🛑 Received shutdown signal");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("✅ Admin Service shutdown successfully");
    Ok(())
}
