//! Error types for smsfilter

/// Result type alias using smsfilter's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error attached as the cause of a failed model fetch
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for smsfilter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text preprocessing errors
    #[error("preprocessing error: {0}")]
    Preprocess(String),

    /// Model loading or inference errors
    #[error("model error: {0}")]
    Model(String),

    /// Download or extraction of the model artifact failed
    #[error("failed to download or extract the model: {message}")]
    ModelFetch {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// No artifact on disk and no version to download
    #[error(
        "model version must be provided if the model file does not exist \
         (set MODEL_VERSION, 'latest' selects the newest release)"
    )]
    MissingModelVersion,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new preprocessing error
    pub fn preprocess(msg: impl Into<String>) -> Self {
        Self::Preprocess(msg.into())
    }

    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a model fetch error with its underlying cause
    pub fn model_fetch<E>(msg: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::ModelFetch {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// Create a model fetch error without an underlying cause
    pub fn model_fetch_msg(msg: impl Into<String>) -> Self {
        Self::ModelFetch {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
