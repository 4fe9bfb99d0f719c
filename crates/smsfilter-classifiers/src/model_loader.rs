//! Model artifact resolution: reuse what is on disk or fetch a release bundle

use smsfilter_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the server expects the model artifact
pub const DEFAULT_ARTIFACT_PATH: &str = "output/model.joblib";

/// Release host the versioned model bundles are published to
pub const DEFAULT_RELEASES_URL: &str = "https://github.com/doda2025-team20/model-service/releases";

/// Transient archive name, removed after extraction
pub const ARCHIVE_NAME: &str = "model.zip";

/// Version selector for the newest release
pub const LATEST: &str = "latest";

/// Build the download URL of a release bundle
pub fn release_url(releases_url: &str, version: Option<&str>) -> String {
    let base = releases_url.trim_end_matches('/');
    match version {
        None | Some(LATEST) => format!("{}/latest/download/{}", base, ARCHIVE_NAME),
        Some(version) => format!("{}/download/{}/{}", base, version, ARCHIVE_NAME),
    }
}

/// Outcome of [`ModelFetcher::ensure`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    /// Artifact was already on disk, nothing fetched
    Present,
    /// Artifact was downloaded from the given URL
    Downloaded { url: String },
}

/// Makes sure the model artifact exists locally before serving
#[derive(Debug, Clone)]
pub struct ModelFetcher {
    client: reqwest::Client,
    releases_url: String,
    work_dir: PathBuf,
    artifact_path: PathBuf,
}

impl ModelFetcher {
    /// Create a fetcher for the given artifact path, extracting into the
    /// current directory
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            work_dir: PathBuf::from("."),
            artifact_path: artifact_path.into(),
        }
    }

    /// Set the release host base URL
    pub fn with_releases_url(mut self, url: impl Into<String>) -> Self {
        self.releases_url = url.into();
        self
    }

    /// Set the directory the archive is written to and extracted into
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Ensure the artifact is on disk.
    ///
    /// An existing artifact is reused as-is, whatever version it came from.
    /// Otherwise the release bundle for `version` is downloaded and unpacked.
    pub async fn ensure(&self, version: Option<&str>) -> Result<ArtifactStatus> {
        if self.artifact_path.exists() {
            info!(
                path = %self.artifact_path.display(),
                "model already exists, skipping download"
            );
            return Ok(ArtifactStatus::Present);
        }

        let version = version.ok_or(Error::MissingModelVersion)?;
        info!(version, "model not found, downloading");

        let url = release_url(&self.releases_url, Some(version));
        let archive = self.work_dir.join(ARCHIVE_NAME);

        self.download(&url, &archive).await?;
        extract_archive(&archive, &self.work_dir).await?;
        tokio::fs::remove_file(&archive)
            .await
            .map_err(|e| Error::model_fetch(format!("remove {}", archive.display()), e))?;

        if !self.artifact_path.exists() {
            return Err(Error::model_fetch_msg(format!(
                "archive from {} did not contain {}",
                url,
                self.artifact_path.display()
            )));
        }

        info!(url = %url, "model downloaded and extracted successfully");
        Ok(ArtifactStatus::Downloaded { url })
    }

    async fn download(&self, url: &str, archive: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::model_fetch(format!("request {}", url), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "model download failed");
            return Err(Error::model_fetch_msg(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::model_fetch(format!("read body of {}", url), e))?;

        tokio::fs::write(archive, &bytes)
            .await
            .map_err(|e| Error::model_fetch(format!("write {}", archive.display()), e))?;

        Ok(())
    }
}

/// Unpack a zip archive into `dest`, preserving its relative paths
async fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&archive)
            .map_err(|e| Error::model_fetch(format!("open {}", archive.display()), e))?;
        let mut zip = zip::ZipArchive::new(file)
            .map_err(|e| Error::model_fetch(format!("read {}", archive.display()), e))?;
        zip.extract(&dest)
            .map_err(|e| Error::model_fetch(format!("extract {}", archive.display()), e))
    })
    .await
    .map_err(|e| Error::internal(format!("extraction task failed: {}", e)))?
}
