//! Decision tree spam model loaded from a serialized artifact
//!
//! The artifact is a JSON document holding the class labels and a flat node
//! array in the layout tree learners export: node 0 is the root, every split
//! references children that appear later in the array, and leaves carry the
//! per-class training sample counts.
//!
//! ```json
//! {
//!   "classifier": "decision tree",
//!   "labels": ["ham", "spam"],
//!   "nodes": [
//!     { "type": "split", "feature": { "term": "free" }, "threshold": 0.5, "left": 1, "right": 2 },
//!     { "type": "leaf", "counts": [90.0, 10.0] },
//!     { "type": "leaf", "counts": [5.0, 45.0] }
//!   ]
//! }
//! ```

use crate::classifier::SpamModel;
use crate::preprocessing::Features;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use smsfilter_core::{Error, Label, Result, CLASSIFIER_NAME};
use std::path::Path;
use tracing::info;

/// Serialized form of a decision tree model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    /// Classifier description
    #[serde(default = "default_classifier")]
    pub classifier: String,

    /// Class labels in the order leaf counts are stored
    pub labels: Vec<Label>,

    /// Flat node array, root first
    pub nodes: Vec<TreeNode>,
}

/// A node of the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go left when the feature value is `<= threshold`, otherwise right
    Split {
        feature: SplitFeature,
        threshold: f64,
        left: usize,
        right: usize,
    },

    /// Terminal node with per-class sample counts
    Leaf { counts: [f64; 2] },
}

/// Feature a split node reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitFeature {
    /// Count of a cleaned term
    Term(String),
    /// Character length of the raw message
    MessageLength,
}

impl SplitFeature {
    fn value(&self, features: &Features) -> f64 {
        match self {
            Self::Term(term) => f64::from(features.term_count(term)),
            Self::MessageLength => features.message_len as f64,
        }
    }
}

fn default_classifier() -> String {
    CLASSIFIER_NAME.to_string()
}

/// Decision tree classifier over [`Features`]
#[derive(Debug, Clone)]
pub struct DecisionTreeModel {
    name: String,
    nodes: Vec<TreeNode>,
    /// Position of each artifact label in `Label` index order
    label_order: [usize; 2],
}

impl DecisionTreeModel {
    /// Load and validate a model artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::model(format!("failed to read model artifact {:?}: {}", path, e))
        })?;
        let artifact: TreeArtifact = serde_json::from_str(&content)?;
        let model = Self::from_artifact(artifact)?;

        info!(
            path = %path.display(),
            nodes = model.nodes.len(),
            "loaded decision tree model"
        );
        Ok(model)
    }

    /// Build a model from an in-memory artifact
    pub fn from_artifact(artifact: TreeArtifact) -> Result<Self> {
        let label_order = Self::label_order(&artifact.labels)?;
        Self::validate_nodes(&artifact.nodes)?;

        Ok(Self {
            name: artifact.classifier,
            nodes: artifact.nodes,
            label_order,
        })
    }

    fn label_order(labels: &[Label]) -> Result<[usize; 2]> {
        if labels.len() != 2 {
            return Err(Error::model(format!(
                "expected exactly 2 labels, found {}",
                labels.len()
            )));
        }

        let position = |label: Label| {
            labels
                .iter()
                .position(|l| *l == label)
                .ok_or_else(|| Error::model(format!("label '{}' missing from artifact", label)))
        };

        Ok([position(Label::Ham)?, position(Label::Spam)?])
    }

    fn validate_nodes(nodes: &[TreeNode]) -> Result<()> {
        if nodes.is_empty() {
            return Err(Error::model("model artifact has no nodes"));
        }

        for (index, node) in nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    left,
                    right,
                    threshold,
                    ..
                } => {
                    // Children must come later so traversal always terminates
                    for child in [*left, *right] {
                        if child <= index || child >= nodes.len() {
                            return Err(Error::model(format!(
                                "node {} has invalid child {}",
                                index, child
                            )));
                        }
                    }
                    if !threshold.is_finite() {
                        return Err(Error::model(format!(
                            "node {} has a non-finite threshold",
                            index
                        )));
                    }
                }
                TreeNode::Leaf { counts } => {
                    if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
                        return Err(Error::model(format!(
                            "leaf {} has invalid class counts",
                            index
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walk from the root to the leaf these features fall into
    fn leaf_counts(&self, features: &Features) -> [f64; 2] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if feature.value(features) <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { counts } => {
                    return [counts[self.label_order[0]], counts[self.label_order[1]]];
                }
            }
        }
    }

    /// Probabilities in `Label` index order
    pub fn probabilities(&self, features: &Features) -> [f64; 2] {
        let counts = self.leaf_counts(features);
        let total = counts[0] + counts[1];
        if total <= 0.0 {
            return [1.0, 0.0];
        }
        [counts[0] / total, counts[1] / total]
    }

    /// Most probable label, ties going to the default label
    pub fn label(&self, features: &Features) -> Label {
        let probabilities = self.probabilities(features);
        if probabilities[Label::Spam.index()] > probabilities[Label::Ham.index()] {
            Label::Spam
        } else {
            Label::Ham
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[async_trait]
impl SpamModel for DecisionTreeModel {
    async fn predict(&self, features: &Features) -> Result<Label> {
        Ok(self.label(features))
    }

    async fn predict_proba(&self, features: &Features) -> Result<[f64; 2]> {
        Ok(self.probabilities(features))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
