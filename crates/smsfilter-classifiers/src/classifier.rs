//! Model trait and the classifier that pairs it with preprocessing

use crate::preprocessing::{Features, Preprocessor};
use async_trait::async_trait;
use smsfilter_core::{BulkPrediction, Label, Prediction, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Trait for trained spam/ham models
#[async_trait]
pub trait SpamModel: Send + Sync {
    /// Predict the label for prepared features
    async fn predict(&self, features: &Features) -> Result<Label>;

    /// Class probabilities, indexed by [`Label::index`]
    async fn predict_proba(&self, features: &Features) -> Result<[f64; 2]>;

    /// Get the model name
    fn name(&self) -> &str;
}

/// Preprocessor and model, shared read-only between requests
#[derive(Clone)]
pub struct SpamClassifier {
    preprocessor: Arc<dyn Preprocessor>,
    model: Arc<dyn SpamModel>,
}

impl SpamClassifier {
    pub fn new(preprocessor: Arc<dyn Preprocessor>, model: Arc<dyn SpamModel>) -> Self {
        Self {
            preprocessor,
            model,
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classify one message, reporting the probability of the predicted class
    pub async fn classify(&self, sms: &str) -> Result<Prediction> {
        let start = Instant::now();

        let features = self.preprocessor.prepare(sms)?;
        let label = self.model.predict(&features).await?;
        let probabilities = self.model.predict_proba(&features).await?;
        let confidence = probabilities[label.index()];

        debug!(
            model = self.model.name(),
            %label,
            confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "classified message"
        );

        Ok(Prediction::new(label, confidence, sms))
    }

    /// Classify messages in order. The first failure aborts the batch.
    pub async fn classify_bulk(&self, messages: &[String]) -> Result<Vec<BulkPrediction>> {
        let mut results = Vec::with_capacity(messages.len());

        for sms in messages {
            let features = self.preprocessor.prepare(sms)?;
            let label = self.model.predict(&features).await?;
            results.push(BulkPrediction::new(label, sms.as_str()));
        }

        debug!(count = results.len(), "classified bulk messages");
        Ok(results)
    }
}
