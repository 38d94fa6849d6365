use thiserror::Error;

/// Top-level error type for the Chronicle workspace.
///
/// Classification, extraction and timeline failures share one taxonomy so the
/// `?` operator works across crate boundaries without conversion layers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChronicleError {
    #[error("Vectorizer used before fit")]
    NotFitted,

    #[error("Empty vocabulary: the training corpus produced no terms")]
    EmptyVocabulary,

    #[error("Insufficient training data: {0}")]
    InsufficientTrainingData(String),

    #[error("Dimension mismatch: expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Malformed timestamp '{value}': {reason}")]
    MalformedTimestamp { value: String, reason: String },

    #[error("Entity recognizer error: {0}")]
    Recognizer(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Worker task failed: {0}")]
    Worker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ChronicleError {
    fn from(err: toml::de::Error) -> Self {
        ChronicleError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ChronicleError {
    fn from(err: toml::ser::Error) -> Self {
        ChronicleError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ChronicleError {
    fn from(err: serde_json::Error) -> Self {
        ChronicleError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Chronicle operations.
pub type Result<T> = std::result::Result<T, ChronicleError>;
