//! smsfilter Classifiers
//!
//! Everything between a raw SMS and a label:
//! - [`preprocessing`]: text cleaning and term counting
//! - [`decision_tree`]: the trained model, loaded from its on-disk artifact
//! - [`classifier`]: the model trait and the preprocess → predict flow
//! - [`model_loader`]: resolving the artifact locally or from a release bundle

pub mod classifier;
pub mod decision_tree;
pub mod model_loader;
pub mod preprocessing;

pub use classifier::{SpamClassifier, SpamModel};
pub use decision_tree::{DecisionTreeModel, SplitFeature, TreeArtifact, TreeNode};
pub use model_loader::{
    release_url, ArtifactStatus, ModelFetcher, ARCHIVE_NAME, DEFAULT_ARTIFACT_PATH,
    DEFAULT_RELEASES_URL, LATEST,
};
pub use preprocessing::{Features, Preprocessor, TextPreprocessor};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{SpamClassifier, SpamModel};
    pub use crate::decision_tree::DecisionTreeModel;
    pub use crate::model_loader::ModelFetcher;
    pub use crate::preprocessing::{Features, Preprocessor, TextPreprocessor};
}
