//! Error types for the Sahih library.
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! is the crate-wide [`SahihError`] enum. Model-load failures are surfaced
//! to the caller; prediction-path failures are absorbed into error-carrying
//! results at the engine boundary, so the only hard error `predict_batch`
//! can return is an oversized batch.

use std::io;

use thiserror::Error;

/// The main error type for Sahih operations.
#[derive(Error, Debug)]
pub enum SahihError {
    /// I/O errors (model file access, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Model bundle path did not resolve to a file.
    #[error("Model not found: {0}")]
    NotFound(String),

    /// Model bundle was read but a mandatory component is missing.
    #[error("Incomplete model bundle: {0}")]
    IncompleteModel(String),

    /// Model bundle could not be deserialized.
    #[error("Deserialize error: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Prediction requested before a model was loaded.
    #[error("Model not loaded")]
    ModelNotLoaded,

    /// Batch request exceeded the hard item cap.
    #[error("Batch too large: {len} texts (maximum {max})")]
    BatchTooLarge { len: usize, max: usize },

    /// Classifier call failed (malformed vector, internal error).
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Text analysis errors (tokenization, normalization).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid input (length bounds, malformed request).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SahihError.
pub type Result<T> = std::result::Result<T, SahihError>;

impl SahihError {
    /// Create a new not-found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        SahihError::NotFound(msg.into())
    }

    /// Create a new incomplete-model error.
    pub fn incomplete_model<S: Into<String>>(msg: S) -> Self {
        SahihError::IncompleteModel(msg.into())
    }

    /// Create a new classifier error.
    pub fn classifier<S: Into<String>>(msg: S) -> Self {
        SahihError::Classifier(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SahihError::Analysis(msg.into())
    }

    /// Create a new invalid-input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        SahihError::InvalidInput(msg.into())
    }
}
