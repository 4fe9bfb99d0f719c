//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use smsfilter_core::{BulkPrediction, Prediction};
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::docs::{self, APIDOCS_PATH, APISPEC_PATH};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/predict", post(predict))
        .route("/bulk", post(predict_bulk))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route(APISPEC_PATH, get(docs::apispec))
        .route(APIDOCS_PATH, get(docs::apidocs))
        .route("/apidocs/", get(docs::apidocs))
        .fallback(fallback);

    let router = if state.config.debug {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Single prediction request
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub sms: String,
}

/// Bulk prediction request
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkRequest {
    pub bulk: Vec<String>,
}

/// Classify one message
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<Prediction>, AppError> {
    metrics::counter!("smsfilter_requests_total", "endpoint" => "predict").increment(1);
    let start = Instant::now();

    let prediction = state.classifier.classify(&req.sms).await?;

    metrics::histogram!("smsfilter_prediction_latency_us")
        .record(start.elapsed().as_micros() as f64);
    metrics::counter!("smsfilter_predictions_total", "label" => prediction.result.as_str())
        .increment(1);
    info!(
        result = %prediction.result,
        confidence = prediction.confidence,
        sms = %prediction.sms,
        "prediction"
    );

    Ok(Json(prediction))
}

/// Classify a batch of messages, in order
async fn predict_bulk(
    State(state): State<AppState>,
    Json(req): Json<BulkRequest>,
) -> Result<Json<Vec<BulkPrediction>>, AppError> {
    metrics::counter!("smsfilter_requests_total", "endpoint" => "bulk").increment(1);
    let start = Instant::now();

    let results = state.classifier.classify_bulk(&req.bulk).await?;

    metrics::histogram!("smsfilter_prediction_latency_us")
        .record(start.elapsed().as_micros() as f64);
    for result in &results {
        metrics::counter!("smsfilter_predictions_total", "label" => result.result.as_str())
            .increment(1);
    }
    info!(count = results.len(), "bulk prediction");

    Ok(Json(results))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    Classification(smsfilter_core::Error),
}

impl From<smsfilter_core::Error> for AppError {
    fn from(err: smsfilter_core::Error) -> Self {
        AppError::Classification(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Classification(err) = self;
        error!(error = %err, "classification failed");

        let kind = match &err {
            smsfilter_core::Error::Preprocess(_) => "preprocessing_error",
            smsfilter_core::Error::Model(_) => "model_error",
            _ => "internal_error",
        };

        let body = json!({
            "error": {
                "message": err.to_string(),
                "type": kind,
            }
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
