//! TF-IDF text vectorizer.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SahihError};
use crate::ml::TextVectorizer;

/// TF-IDF vectorizer over a fixed, trained vocabulary.
///
/// The vocabulary and IDF weights are produced by whatever trained the
/// classifier bundle; this type only applies them. Term frequencies are
/// normalized by document length before the IDF weighting, and unknown
/// terms are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Word -> column index mapping.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Create a vectorizer from a trained vocabulary and IDF table.
    ///
    /// Fails when a vocabulary index falls outside the IDF table.
    pub fn new(vocabulary: AHashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        if let Some((word, &idx)) = vocabulary.iter().find(|&(_, &idx)| idx >= idf.len()) {
            return Err(SahihError::incomplete_model(format!(
                "tfidf vocabulary entry {word:?} maps to column {idx} outside the idf table"
            )));
        }
        Ok(TfIdfVectorizer { vocabulary, idf })
    }

    /// Number of terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Re-check the vocabulary/IDF invariant after deserialization.
    pub fn validate(&self) -> Result<()> {
        if let Some((word, &idx)) = self
            .vocabulary
            .iter()
            .find(|&(_, &idx)| idx >= self.idf.len())
        {
            return Err(SahihError::incomplete_model(format!(
                "tfidf vocabulary entry {word:?} maps to column {idx} outside the idf table"
            )));
        }
        Ok(())
    }
}

impl TextVectorizer for TfIdfVectorizer {
    fn transform(&self, text: &str) -> Result<Vec<f64>> {
        let mut tf = vec![0.0; self.idf.len()];
        let mut token_count = 0usize;

        for token in text.split_whitespace() {
            token_count += 1;
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }

        if token_count > 0 {
            let doc_length = token_count as f64;
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (idx, count) in tf.iter_mut().enumerate() {
            *count *= self.idf[idx];
        }

        Ok(tf)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}
