//! Mock models for testing
//!
//! Configurable implementations of the SpamModel and Preprocessor traits
//! for exercising the classify and bulk flows without a trained artifact.

use async_trait::async_trait;
use smsfilter_classifiers::{Features, Preprocessor, SpamClassifier, SpamModel};
use smsfilter_core::{Error, Label, Result};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A model returning a fixed label and probability vector
pub struct MockModel {
    label: Label,
    probabilities: [f64; 2],
    predict_calls: AtomicU32,
    proba_calls: AtomicU32,
}

impl MockModel {
    pub fn new(label: Label, probabilities: [f64; 2]) -> Self {
        Self {
            label,
            probabilities,
            predict_calls: AtomicU32::new(0),
            proba_calls: AtomicU32::new(0),
        }
    }

    /// Get the number of times predict was called
    pub fn predict_calls(&self) -> u32 {
        self.predict_calls.load(Ordering::Relaxed)
    }

    pub fn proba_calls(&self) -> u32 {
        self.proba_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SpamModel for MockModel {
    async fn predict(&self, features: &Features) -> Result<Label> {
        self.predict_calls.fetch_add(1, Ordering::Relaxed);

        // Messages mentioning "spam" flip to spam so ordering is observable
        if features.term_count("spam") > 0 {
            return Ok(Label::Spam);
        }
        Ok(self.label)
    }

    async fn predict_proba(&self, _features: &Features) -> Result<[f64; 2]> {
        self.proba_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.probabilities)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A model that always fails - for testing error paths
pub struct FailingModel;

#[async_trait]
impl SpamModel for FailingModel {
    async fn predict(&self, _features: &Features) -> Result<Label> {
        Err(Error::model("simulated model failure"))
    }

    async fn predict_proba(&self, _features: &Features) -> Result<[f64; 2]> {
        Err(Error::model("simulated model failure"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Deterministic preprocessor: every whitespace-separated word lowercased,
/// rejects messages containing "\u{0}"
pub struct StubPreprocessor;

impl Preprocessor for StubPreprocessor {
    fn prepare(&self, sms: &str) -> Result<Features> {
        if sms.contains('\u{0}') {
            return Err(Error::preprocess("message contains NUL"));
        }

        let mut features = Features {
            message_len: sms.len(),
            ..Default::default()
        };
        for word in sms.split_whitespace() {
            *features.terms.entry(word.to_lowercase()).or_insert(0) += 1;
        }
        Ok(features)
    }
}

fn classifier(model: Arc<dyn SpamModel>) -> SpamClassifier {
    SpamClassifier::new(Arc::new(StubPreprocessor), model)
}

#[tokio::test]
async fn test_confidence_uses_spam_index() {
    let model = Arc::new(MockModel::new(Label::Spam, [0.2, 0.8]));
    let prediction = classifier(model.clone())
        .classify("WIN A FREE PRIZE")
        .await
        .unwrap();

    assert_eq!(prediction.result, Label::Spam);
    assert_eq!(prediction.confidence, 0.8);
    assert_eq!(prediction.classifier, "decision tree");
    assert_eq!(prediction.sms, "WIN A FREE PRIZE");
    assert_eq!(model.predict_calls(), 1);
    assert_eq!(model.proba_calls(), 1);
}

#[tokio::test]
async fn test_confidence_uses_ham_index() {
    let model = Arc::new(MockModel::new(Label::Ham, [0.65, 0.35]));
    let prediction = classifier(model).classify("WIN A FREE PRIZE").await.unwrap();

    assert_eq!(prediction.result, Label::Ham);
    assert_eq!(prediction.confidence, 0.65);
}

#[tokio::test]
async fn test_bulk_calls_model_once_per_message_in_order() {
    let model = Arc::new(MockModel::new(Label::Ham, [0.9, 0.1]));
    let messages = vec![
        "hello there".to_string(),
        "cheap spam offer".to_string(),
        "see you soon".to_string(),
    ];

    let results = classifier(model.clone())
        .classify_bulk(&messages)
        .await
        .unwrap();

    assert_eq!(model.predict_calls(), 3);
    assert_eq!(model.proba_calls(), 0);
    let echoed: Vec<_> = results.iter().map(|r| r.sms.as_str()).collect();
    assert_eq!(echoed, vec!["hello there", "cheap spam offer", "see you soon"]);
    let labels: Vec<_> = results.iter().map(|r| r.result).collect();
    assert_eq!(labels, vec![Label::Ham, Label::Spam, Label::Ham]);
}

#[tokio::test]
async fn test_bulk_empty() {
    let model = Arc::new(MockModel::new(Label::Ham, [0.9, 0.1]));
    let results = classifier(model.clone()).classify_bulk(&[]).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(model.predict_calls(), 0);
}

#[tokio::test]
async fn test_bulk_aborts_on_first_failure() {
    let model = Arc::new(MockModel::new(Label::Ham, [0.9, 0.1]));
    let messages = vec![
        "fine".to_string(),
        "broken\u{0}".to_string(),
        "never reached".to_string(),
    ];

    let result = classifier(model.clone()).classify_bulk(&messages).await;

    assert!(matches!(result, Err(Error::Preprocess(_))));
    assert_eq!(model.predict_calls(), 1);
}

#[tokio::test]
async fn test_failing_model() {
    let result = classifier(Arc::new(FailingModel)).classify("test").await;
    assert!(matches!(result, Err(Error::Model(_))));
}
