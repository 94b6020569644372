//! Hopper design service
//!
//! Serves the single-page dashboard, the design API, the CSV report
//! download, and health/metrics endpoints. Model artifacts are loaded once
//! at startup; a failed load leaves the service up but not ready, with
//! computation disabled.

use anyhow::Result;
use hopper_core::{AuditLogger, HealthRegistry, ModelStore, StructuredLogger, SuiteMetrics};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod render;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting hopperd");

    // Load configuration
    let config = config::HopperConfig::load()?;
    info!(
        api_port = config.api_port,
        audit_configured = config.audit_url.is_some(),
        "Service configured"
    );

    // Load the model artifacts once for the process lifetime
    let store = Arc::new(ModelStore::load(
        Path::new(&config.classifier_path),
        Path::new(&config.regressors_path),
    ));

    let audit = AuditLogger::new(config.audit_url.clone())?;

    // Seed health from the startup state of both components
    let health_registry = HealthRegistry::new(store.is_available(), audit.is_configured());

    // Initialize metrics and structured logging
    let metrics = SuiteMetrics::new();
    metrics.set_model_availability(store.is_available());

    let logger = StructuredLogger::new("hopperd");
    logger.log_startup(SERVICE_VERSION, store.is_available());

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(
        store,
        audit,
        health_registry.clone(),
        metrics.clone(),
        logger.clone(),
    ));

    // Start the dashboard and API server
    let api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");
    api_handle.abort();

    Ok(())
}
