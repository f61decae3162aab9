//! Classifier integration for Sahih.
//!
//! This module defines the contracts the externally trained artifacts must
//! satisfy (classifier, text vectorizer, feature scaler), the serializable
//! implementations a model bundle deserializes into, and the bridge that
//! turns a feature record into the exact ordered vector the classifier
//! consumes.

pub mod bundle;
pub mod ensemble;
pub mod scaler;
pub mod tfidf;
pub mod vectorize;

pub use bundle::*;
pub use ensemble::*;
pub use scaler::*;
pub use tfidf::*;
pub use vectorize::*;

use crate::error::Result;

/// Index of the REAL class in probability vectors.
pub const CLASS_REAL: usize = 0;
/// Index of the FAKE class in probability vectors.
pub const CLASS_FAKE: usize = 1;

/// Trait for trained binary classifiers.
///
/// Probability vectors are `[p_real, p_fake]`; labels are the class
/// indices [`CLASS_REAL`] and [`CLASS_FAKE`].
pub trait Classifier: Send + Sync {
    /// Predict the class label for a combined input vector.
    fn predict(&self, input: &[f64]) -> Result<usize>;

    /// Predict per-class probabilities for a combined input vector.
    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>>;
}

/// Trait for sparse text-embedding vectorizers (TF-IDF style).
pub trait TextVectorizer: Send + Sync {
    /// Transform one normalized text into its embedding vector.
    fn transform(&self, text: &str) -> Result<Vec<f64>>;

    /// Output dimension of [`TextVectorizer::transform`].
    fn dimension(&self) -> usize;
}

/// Trait for numeric feature scalers.
pub trait FeatureScaler: Send + Sync {
    /// Scale one dense feature vector.
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}
