//! Release bundle download tests against a local HTTP server

use axum::{routing::get, Router};
use smsfilter_classifiers::{ArtifactStatus, DecisionTreeModel, ModelFetcher};
use smsfilter_core::Error;
use std::io::Write;
use std::net::SocketAddr;
use zip::write::SimpleFileOptions;

const ARTIFACT: &str = r#"{
    "labels": ["ham", "spam"],
    "nodes": [
        { "type": "split", "feature": { "term": "prize" }, "threshold": 0.5, "left": 1, "right": 2 },
        { "type": "leaf", "counts": [40.0, 2.0] },
        { "type": "leaf", "counts": [1.0, 19.0] }
    ]
}"#;

fn model_zip() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("output/model.joblib", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(ARTIFACT.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// Serve the bundle at the "latest" and "v1.0.0" release paths
async fn spawn_release_host() -> SocketAddr {
    let bundle = model_zip();
    let latest = bundle.clone();
    let app = Router::new()
        .route(
            "/releases/latest/download/model.zip",
            get(move || async move { latest }),
        )
        .route(
            "/releases/download/v1.0.0/model.zip",
            get(move || async move { bundle }),
        )
        .route(
            "/releases/download/broken/model.zip",
            get(|| async { b"not a zip archive".to_vec() }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn fetcher(addr: SocketAddr, dir: &std::path::Path) -> ModelFetcher {
    ModelFetcher::new(dir.join("output/model.joblib"))
        .with_releases_url(format!("http://{}/releases", addr))
        .with_work_dir(dir)
}

#[tokio::test]
async fn test_downloads_and_extracts_latest() {
    let addr = spawn_release_host().await;
    let dir = tempfile::tempdir().unwrap();
    let fetcher = fetcher(addr, dir.path());

    let status = fetcher.ensure(Some("latest")).await.unwrap();

    assert_eq!(
        status,
        ArtifactStatus::Downloaded {
            url: format!("http://{}/releases/latest/download/model.zip", addr)
        }
    );
    assert!(fetcher.artifact_path().exists());
    assert!(!dir.path().join("model.zip").exists());

    let model = DecisionTreeModel::load(fetcher.artifact_path()).unwrap();
    assert_eq!(model.node_count(), 3);

    // Second call finds the artifact and skips the network
    assert_eq!(
        fetcher.ensure(Some("latest")).await.unwrap(),
        ArtifactStatus::Present
    );
}

#[tokio::test]
async fn test_downloads_pinned_version() {
    let addr = spawn_release_host().await;
    let dir = tempfile::tempdir().unwrap();

    let status = fetcher(addr, dir.path())
        .ensure(Some("v1.0.0"))
        .await
        .unwrap();

    assert!(matches!(status, ArtifactStatus::Downloaded { .. }));
    assert!(dir.path().join("output/model.joblib").exists());
}

#[tokio::test]
async fn test_unknown_version_fails() {
    let addr = spawn_release_host().await;
    let dir = tempfile::tempdir().unwrap();

    let result = fetcher(addr, dir.path()).ensure(Some("v9.9.9")).await;

    match result {
        Err(Error::ModelFetch { message, .. }) => assert!(message.contains("404")),
        other => panic!("expected ModelFetch error, got {:?}", other),
    }
    assert!(!dir.path().join("output/model.joblib").exists());
}

#[tokio::test]
async fn test_corrupt_archive_fails() {
    let addr = spawn_release_host().await;
    let dir = tempfile::tempdir().unwrap();

    let result = fetcher(addr, dir.path()).ensure(Some("broken")).await;

    assert!(matches!(result, Err(Error::ModelFetch { .. })));
}
