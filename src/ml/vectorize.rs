//! Feature vectorizer bridge.
//!
//! Maps a [`FeatureRecord`] into the exact ordered numeric vector the
//! trained classifier expects, concatenated with the sparse text embedding.

use crate::error::{Result, SahihError};
use crate::features::FeatureRecord;
use crate::ml::{FeatureScaler, TextVectorizer};

/// Ordered numeric feature names forming the dense half of the model input.
///
/// This ordering is a versioned contract shared with the training side;
/// reordering or editing it invalidates every trained bundle. Note that
/// `sentiment_neutral` is part of the record schema but not of the vector.
pub const FEATURE_ORDER: &[&str] = &[
    "length",
    "word_count",
    "avg_word_length",
    "sentence_count",
    "exclamation_count",
    "question_count",
    "caps_ratio",
    "punctuation_ratio",
    "sentiment_compound",
    "sentiment_positive",
    "sentiment_negative",
    "malaysian_terms_count",
    "malaysian_terms_ratio",
    "product_terms_count",
    "product_terms_ratio",
    "repeated_words",
    "spelling_errors",
    "textblob_polarity",
    "textblob_subjectivity",
];

/// Ordered boolean feature names, appended after [`FEATURE_ORDER`] as 0/1.
pub const BINARY_FEATURE_ORDER: &[&str] = &[
    "has_mixed_language",
    "has_specific_details",
    "has_generic_phrases",
    "has_promotional_language",
];

/// Total dense-vector width (numeric + boolean columns).
pub const DENSE_FEATURE_COUNT: usize = FEATURE_ORDER.len() + BINARY_FEATURE_ORDER.len();

/// Read the record in contract order into the raw dense vector.
pub fn dense_features(record: &FeatureRecord) -> Vec<f64> {
    FEATURE_ORDER
        .iter()
        .chain(BINARY_FEATURE_ORDER.iter())
        .map(|name| {
            record
                .value(name)
                .expect("feature order names are part of the closed schema")
        })
        .collect()
}

/// Build the combined classifier input for one text.
///
/// The sparse text embedding comes first, then the scaled dense features,
/// matching the layout the classifier was trained against.
pub fn to_model_input(
    normalized: &str,
    record: &FeatureRecord,
    vectorizer: &dyn TextVectorizer,
    scaler: &dyn FeatureScaler,
) -> Result<Vec<f64>> {
    let sparse = vectorizer.transform(normalized)?;
    let scaled = scaler
        .transform(&dense_features(record))
        .map_err(|e| SahihError::classifier(format!("feature scaling failed: {e}")))?;

    let mut input = Vec::with_capacity(sparse.len() + scaled.len());
    input.extend_from_slice(&sparse);
    input.extend_from_slice(&scaled);
    Ok(input)
}
