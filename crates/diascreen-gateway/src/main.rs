//! DiaScreen Gateway
//!
//! HTTP inference gateway for diabetes risk screening. The binary
//! acquires a trained classification artifact once at startup, then
//! serves the screening form and the JSON prediction API over axum.

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use diascreen_gateway::cli::Cli;
use diascreen_gateway::config::GatewayConfig;
use diascreen_gateway::routes;
use diascreen_gateway::state::AppState;
use diascreen_model::Predictor;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting DiaScreen gateway");

    // Load configuration
    let config = GatewayConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Listen address: {}", config.listen);
    info!("Model source: {}", config.model.source);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Acquire the model before binding the listener; the gateway never
    // accepts a request without a usable handle.
    let source = config.model.to_artifact_source();
    let options = config.model.to_acquire_options();
    let handle = diascreen_model::acquire(&source, &options)
        .await
        .context("model acquisition failed")?;
    let predictor = Predictor::new(handle);
    info!("Model ready, expects {} features", predictor.feature_count());

    let state = AppState::new(predictor, metrics_handle);
    let app = routes::create_router(state);

    let addr: SocketAddr = config.listen.parse().context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Gateway listening on http://{}", addr);

    // Graceful shutdown handler
    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("diascreen_gateway=debug,diascreen_model=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("diascreen_gateway=info,diascreen_model=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "diascreen_requests_total",
        "Total number of prediction requests received"
    );
    metrics::describe_counter!(
        "diascreen_predictions_total",
        "Total number of successful predictions by verdict"
    );
    metrics::describe_counter!(
        "diascreen_request_errors_total",
        "Total number of failed requests by kind"
    );
    metrics::describe_histogram!(
        "diascreen_inference_latency_us",
        metrics::Unit::Microseconds,
        "Single-row inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
