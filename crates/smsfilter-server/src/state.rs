//! Server context built once at startup and shared by all handlers

use metrics_exporter_prometheus::PrometheusHandle;
use smsfilter_classifiers::{DecisionTreeModel, ModelFetcher, SpamClassifier, TextPreprocessor};
use smsfilter_core::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Preprocessor and model, loaded once
    pub classifier: SpamClassifier,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: ServerConfig, classifier: SpamClassifier) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            metrics_handle: None,
        }
    }

    /// Attach the installed Prometheus recorder
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Make sure the artifact is on disk, then load it.
    ///
    /// Fails when there is no artifact and no version to download, or when
    /// the download, extraction or load fails.
    pub async fn bootstrap(config: ServerConfig) -> Result<Self> {
        let fetcher = ModelFetcher::new(&config.artifact_path)
            .with_releases_url(config.releases_url.clone());
        fetcher.ensure(config.model_version.as_deref()).await?;

        let model = DecisionTreeModel::load(&config.artifact_path)?;
        let classifier = SpamClassifier::new(Arc::new(TextPreprocessor::new()), Arc::new(model));
        info!(model = classifier.model_name(), "classifier ready");

        Ok(Self::new(config, classifier))
    }
}
