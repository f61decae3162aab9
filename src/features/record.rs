//! The closed feature schema for review texts.

use serde::{Deserialize, Serialize};

/// Linguistic features extracted from one review text.
///
/// The schema is closed and every field is always present: a missing signal
/// becomes its documented default (0, 0.5 for the neutral scores, `false`),
/// never an absent key. A subset of these fields, read in a fixed order,
/// forms the dense half of the classifier input (see
/// [`crate::ml::vectorize::FEATURE_ORDER`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Character length of the normalized text.
    pub length: usize,
    /// Number of word tokens.
    pub word_count: usize,
    /// Mean token length in characters (0 with no tokens).
    pub avg_word_length: f64,
    /// Number of `[.!?]+`-split segments.
    pub sentence_count: usize,
    /// Literal `!` count.
    pub exclamation_count: usize,
    /// Literal `?` count.
    pub question_count: usize,
    /// Fraction of upper-case characters over total length.
    pub caps_ratio: f64,
    /// Fraction of characters in `.,!?;:`.
    pub punctuation_ratio: f64,
    /// Sentiment compound score, roughly [-1, 1].
    pub sentiment_compound: f64,
    /// Positive sentiment proportion.
    pub sentiment_positive: f64,
    /// Negative sentiment proportion.
    pub sentiment_negative: f64,
    /// Neutral sentiment proportion.
    pub sentiment_neutral: f64,
    /// Tokens matching the Malaysian colloquial lexicon.
    pub malaysian_terms_count: usize,
    /// `malaysian_terms_count / word_count` (0 for empty input).
    pub malaysian_terms_ratio: f64,
    /// Tokens matching the product-quality lexicon.
    pub product_terms_count: usize,
    /// `product_terms_count / word_count` (0 for empty input).
    pub product_terms_ratio: f64,
    /// Function words from both Malay and English present.
    pub has_mixed_language: bool,
    /// At least two product-quality terms present.
    pub has_specific_details: bool,
    /// Generic-praise phrase present in the normalized text.
    pub has_generic_phrases: bool,
    /// Promotional phrase present in the normalized text.
    pub has_promotional_language: bool,
    /// `word_count` minus distinct token count.
    pub repeated_words: usize,
    /// Cheap misspelling heuristic over the first 20 tokens.
    pub spelling_errors: usize,
    /// TextBlob-style polarity in [-1, 1].
    pub textblob_polarity: f64,
    /// TextBlob-style subjectivity in [0, 1].
    pub textblob_subjectivity: f64,
}

impl FeatureRecord {
    /// The canonical record for empty or whitespace-only input.
    ///
    /// This participates in classifier input, so it must be bit-for-bit
    /// reproducible: all counts and ratios zero, the neutral scores at 0.5,
    /// all booleans false.
    pub fn empty() -> Self {
        FeatureRecord {
            length: 0,
            word_count: 0,
            avg_word_length: 0.0,
            sentence_count: 0,
            exclamation_count: 0,
            question_count: 0,
            caps_ratio: 0.0,
            punctuation_ratio: 0.0,
            sentiment_compound: 0.0,
            sentiment_positive: 0.0,
            sentiment_negative: 0.0,
            sentiment_neutral: 0.5,
            malaysian_terms_count: 0,
            malaysian_terms_ratio: 0.0,
            product_terms_count: 0,
            product_terms_ratio: 0.0,
            has_mixed_language: false,
            has_specific_details: false,
            has_generic_phrases: false,
            has_promotional_language: false,
            repeated_words: 0,
            spelling_errors: 0,
            textblob_polarity: 0.0,
            textblob_subjectivity: 0.5,
        }
    }

    /// Read a field by its schema name as a numeric value (booleans map to
    /// 0/1). Returns `None` for names outside the closed schema.
    pub fn value(&self, name: &str) -> Option<f64> {
        let value = match name {
            "length" => self.length as f64,
            "word_count" => self.word_count as f64,
            "avg_word_length" => self.avg_word_length,
            "sentence_count" => self.sentence_count as f64,
            "exclamation_count" => self.exclamation_count as f64,
            "question_count" => self.question_count as f64,
            "caps_ratio" => self.caps_ratio,
            "punctuation_ratio" => self.punctuation_ratio,
            "sentiment_compound" => self.sentiment_compound,
            "sentiment_positive" => self.sentiment_positive,
            "sentiment_negative" => self.sentiment_negative,
            "sentiment_neutral" => self.sentiment_neutral,
            "malaysian_terms_count" => self.malaysian_terms_count as f64,
            "malaysian_terms_ratio" => self.malaysian_terms_ratio,
            "product_terms_count" => self.product_terms_count as f64,
            "product_terms_ratio" => self.product_terms_ratio,
            "has_mixed_language" => self.has_mixed_language as u8 as f64,
            "has_specific_details" => self.has_specific_details as u8 as f64,
            "has_generic_phrases" => self.has_generic_phrases as u8 as f64,
            "has_promotional_language" => self.has_promotional_language as u8 as f64,
            "repeated_words" => self.repeated_words as f64,
            "spelling_errors" => self.spelling_errors as f64,
            "textblob_polarity" => self.textblob_polarity,
            "textblob_subjectivity" => self.textblob_subjectivity,
            _ => return None,
        };
        Some(value)
    }
}

impl Default for FeatureRecord {
    fn default() -> Self {
        FeatureRecord::empty()
    }
}
