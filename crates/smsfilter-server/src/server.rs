//! Startup sequence: resolve the model, then bind and serve

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use std::future::Future;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Run the server until `shutdown` resolves.
///
/// The model is resolved and loaded before the port is bound, so a missing
/// artifact fails startup without ever accepting a connection.
pub async fn run<F>(
    config: ServerConfig,
    metrics_handle: Option<PrometheusHandle>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Some(url) = &config.legacy_model_url {
        warn!(
            url = %url,
            version = config.model_version.as_deref().unwrap_or("<unset>"),
            "MODEL_URL is unsupported, use MODEL_VERSION instead; the version will be downloaded"
        );
    }

    let addr = config.listen_addr()?;

    let mut state = AppState::bootstrap(config)
        .await
        .context("failed to prepare the model")?;
    if let Some(handle) = metrics_handle {
        state = state.with_metrics(handle);
    }

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
