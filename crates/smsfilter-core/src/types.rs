//! Core types for smsfilter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Descriptive name reported in every prediction response
pub const CLASSIFIER_NAME: &str = "decision tree";

/// Two-class SMS label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Legitimate message (class 0, the default label)
    Ham,
    /// Unsolicited message (class 1)
    Spam,
}

impl Label {
    /// All labels in class index order
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// Class index of this label in a probability vector
    pub fn index(self) -> usize {
        match self {
            Self::Ham => 0,
            Self::Spam => 1,
        }
    }

    /// Label for a class index, if it is in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ham => "ham",
            Self::Spam => "spam",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ham" => Ok(Self::Ham),
            "spam" => Ok(Self::Spam),
            other => Err(format!("unknown label: {}", other)),
        }
    }
}

/// Response of the single prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted label
    pub result: Label,

    /// Probability of the predicted class (0.0-1.0)
    pub confidence: f64,

    /// Classifier description
    pub classifier: String,

    /// Echo of the input message
    pub sms: String,
}

impl Prediction {
    pub fn new(result: Label, confidence: f64, sms: impl Into<String>) -> Self {
        Self {
            result,
            confidence,
            classifier: CLASSIFIER_NAME.to_string(),
            sms: sms.into(),
        }
    }
}

/// One element of the bulk prediction response.
///
/// Bulk results carry no confidence score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPrediction {
    /// Predicted label
    pub result: Label,

    /// Classifier description
    pub classifier: String,

    /// Echo of the input message
    pub sms: String,
}

impl BulkPrediction {
    pub fn new(result: Label, sms: impl Into<String>) -> Self {
        Self {
            result,
            classifier: CLASSIFIER_NAME.to_string(),
            sms: sms.into(),
        }
    }
}
