//! Eggwatch Backend Service
//!
//! Main entry point for the Eggwatch egg price tracker backend.
//! This service provides:
//! - JSON REST API for price search and store lookups
//! - Background task that refreshes store prices on a fixed period

use eggwatch_backend::services::PriceRefresher;
use eggwatch_backend::{http_service, AppConfig, AppError, AppResult, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("eggwatch_backend={},axum=info", config.log_level).into()
            }),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║          Eggwatch Backend Service Starting               ║");
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    if config.synthetic_data {
        if config.is_production() {
            warn!("SYNTHETIC_DATA is enabled in production - searches without real coverage will fabricate stores");
        } else {
            info!("Synthetic data mode enabled");
        }
    }

    // =========================================================================
    // CORE SERVICES INITIALIZATION
    // =========================================================================
    let app_state = Arc::new(AppState::new(&config));
    info!("✓ Application state initialized");

    // =========================================================================
    // BACKGROUND TASKS
    // =========================================================================
    let refresher = PriceRefresher::new(app_state.store_repo.clone())
        .with_refresh_interval(config.refresh_interval());

    let mut refresher_handle = tokio::spawn(async move {
        refresher.start().await;
    });
    info!(
        "✓ Price refresher started ({}h interval)",
        config.price_refresh_interval_hours
    );

    // =========================================================================
    // START SERVER
    // =========================================================================
    let http_addr: SocketAddr = format!("0.0.0.0:{}", config.http_port)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid HTTP address: {}", e)))?;

    let app = http_service::router(app_state.clone());
    let listener = TcpListener::bind(http_addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind {}: {}", http_addr, e)))?;

    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("HTTP server error: {}", e);
        }
    });

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║          Eggwatch Backend Service Ready!                 ║");
    info!("╠══════════════════════════════════════════════════════════╣");
    info!("║  REST API:     0.0.0.0:{}                              ║", config.http_port);
    info!("║  Environment:  {}                                 ║", config.environment);
    info!("╚══════════════════════════════════════════════════════════╝");
    info!("Press Ctrl+C to shutdown gracefully");

    // =========================================================================
    // SHUTDOWN HANDLING
    // =========================================================================
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down gracefully...");
        }
        _ = &mut server_handle => {
            error!("HTTP server exited unexpectedly");
        }
        _ = &mut refresher_handle => {
            error!("Price refresher exited unexpectedly");
        }
    }

    // Stop background work before exiting. The refresher only appends
    // whole records, so aborting mid-tick never leaves partial state.
    refresher_handle.abort();
    server_handle.abort();

    info!("Eggwatch backend service shutdown complete");
    Ok(())
}
