//! smsfilter Server
//!
//! HTTP API of the SMS spam detection model.
//!
//! Configuration comes from the environment (`MODEL_PORT`, `MODEL_VERSION`,
//! `DEBUG`, ...), see [`ServerConfig`].

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use smsfilter_server::ServerConfig;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(config.debug);

    info!("Starting smsfilter server");
    info!("Model artifact: {}", config.artifact_path.display());
    info!(
        "Model version: {}",
        config.model_version.as_deref().unwrap_or("<unset>")
    );

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    smsfilter_server::run(config, Some(metrics_handle), shutdown).await
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("smsfilter=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smsfilter=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "smsfilter_requests_total",
        "Total number of prediction requests by endpoint"
    );
    metrics::describe_counter!(
        "smsfilter_predictions_total",
        "Total number of classified messages by label"
    );
    metrics::describe_histogram!(
        "smsfilter_prediction_latency_us",
        metrics::Unit::Microseconds,
        "Request classification latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
