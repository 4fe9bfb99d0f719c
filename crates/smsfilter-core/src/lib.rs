//! smsfilter Core
//!
//! Core types and error handling shared across the smsfilter crates.
//!
//! This crate provides:
//! - The two-class [`Label`] and its class index mapping
//! - Response payloads for single and bulk predictions
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{BulkPrediction, Label, Prediction, CLASSIFIER_NAME};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{BulkPrediction, Label, Prediction};
}
