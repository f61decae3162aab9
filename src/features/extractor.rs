//! Linguistic feature extractor.

use std::sync::LazyLock;

use ahash::AHashSet;
use regex::Regex;

use crate::analysis::lexicon::{self, MixedLanguageProfile};
use crate::analysis::sentiment::{
    LexiconPolarityAnalyzer, LexiconSentimentAnalyzer, PolarityAnalyzer, SentimentAnalyzer,
    SentimentScores,
};
use crate::analysis::tokenizer::{Tokenizer, UnicodeWordTokenizer, tokenize_or_split};
use crate::features::record::FeatureRecord;

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern should be valid"));

/// Tokens inspected by the spelling-error heuristic.
const SPELLING_SCAN_LIMIT: usize = 20;

/// Which casing source feeds the `caps_ratio` feature.
///
/// The documented policy measures against the original casing of the input;
/// the legacy behavior of measuring the already-lower-cased normalized text
/// (where the ratio degenerates to 0) remains selectable because it affects
/// feature parity with previously trained models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapsRatioSource {
    /// Measure upper-case density on the raw input text.
    #[default]
    OriginalText,
    /// Measure on the normalized (lower-cased) text.
    NormalizedText,
}

/// Extracts a [`FeatureRecord`] from normalized review text.
///
/// Holds the tokenizer and the external sentiment/polarity collaborators.
/// Extraction itself never fails: any collaborator error is replaced with
/// its documented default.
pub struct FeatureExtractor {
    tokenizer: Box<dyn Tokenizer>,
    sentiment: Box<dyn SentimentAnalyzer>,
    polarity: Box<dyn PolarityAnalyzer>,
    caps_source: CapsRatioSource,
    language_profile: MixedLanguageProfile,
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor")
            .field("tokenizer", &self.tokenizer.name())
            .field("sentiment", &self.sentiment.name())
            .field("polarity", &self.polarity.name())
            .field("caps_source", &self.caps_source)
            .field("language_profile", &self.language_profile)
            .finish()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    /// Create an extractor with the built-in tokenizer and analyzers.
    pub fn new() -> Self {
        FeatureExtractor {
            tokenizer: Box::new(UnicodeWordTokenizer::new()),
            sentiment: Box::new(LexiconSentimentAnalyzer::new()),
            polarity: Box::new(LexiconPolarityAnalyzer::new()),
            caps_source: CapsRatioSource::default(),
            language_profile: MixedLanguageProfile::default(),
        }
    }

    /// Create an extractor with custom collaborators.
    pub fn with_components(
        tokenizer: Box<dyn Tokenizer>,
        sentiment: Box<dyn SentimentAnalyzer>,
        polarity: Box<dyn PolarityAnalyzer>,
    ) -> Self {
        FeatureExtractor {
            tokenizer,
            sentiment,
            polarity,
            caps_source: CapsRatioSource::default(),
            language_profile: MixedLanguageProfile::default(),
        }
    }

    /// Select the casing source for `caps_ratio`.
    pub fn caps_source(mut self, source: CapsRatioSource) -> Self {
        self.caps_source = source;
        self
    }

    /// Select the mixed-language function-word profile.
    pub fn language_profile(mut self, profile: MixedLanguageProfile) -> Self {
        self.language_profile = profile;
        self
    }

    /// Extract the full feature record for one text.
    ///
    /// `raw` is the original input (used for `caps_ratio` under the default
    /// policy); `normalized` is the output of
    /// [`crate::analysis::normalizer::normalize`]. Empty or whitespace-only
    /// normalized input yields the canonical empty record.
    pub fn extract(&self, raw: &str, normalized: &str) -> FeatureRecord {
        if normalized.trim().is_empty() {
            return FeatureRecord::empty();
        }

        let tokens = tokenize_or_split(self.tokenizer.as_ref(), normalized);
        let word_count = tokens.len();
        let length = normalized.chars().count();

        let avg_word_length = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / word_count as f64
        };

        let caps_text = match self.caps_source {
            CapsRatioSource::OriginalText => raw,
            CapsRatioSource::NormalizedText => normalized,
        };
        let caps_len = caps_text.chars().count();
        let caps_ratio = if caps_len == 0 {
            0.0
        } else {
            caps_text.chars().filter(|c| c.is_uppercase()).count() as f64 / caps_len as f64
        };

        let punctuation_ratio =
            normalized.chars().filter(|c| ".,!?;:".contains(*c)).count() as f64 / length as f64;

        let sentiment = self
            .sentiment
            .polarity_scores(normalized)
            .unwrap_or_else(|_| SentimentScores::neutral_default());
        let (textblob_polarity, textblob_subjectivity) =
            self.polarity.analyze(normalized).unwrap_or((0.0, 0.5));

        let malaysian_terms_count = lexicon::malaysian_term_count(&tokens);
        let product_terms_count = lexicon::product_term_count(&tokens);

        let distinct: AHashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();

        FeatureRecord {
            length,
            word_count,
            avg_word_length,
            sentence_count: SENTENCE_BOUNDARY.split(normalized).count(),
            exclamation_count: normalized.matches('!').count(),
            question_count: normalized.matches('?').count(),
            caps_ratio,
            punctuation_ratio,
            sentiment_compound: sentiment.compound,
            sentiment_positive: sentiment.positive,
            sentiment_negative: sentiment.negative,
            sentiment_neutral: sentiment.neutral,
            malaysian_terms_count,
            malaysian_terms_ratio: lexicon::term_ratio(malaysian_terms_count, word_count),
            product_terms_count,
            product_terms_ratio: lexicon::term_ratio(product_terms_count, word_count),
            has_mixed_language: lexicon::detect_mixed_language(&tokens, self.language_profile),
            has_specific_details: product_terms_count >= 2,
            has_generic_phrases: lexicon::has_generic_phrases(normalized),
            has_promotional_language: lexicon::has_promotional_language(normalized),
            repeated_words: word_count - distinct.len(),
            spelling_errors: count_spelling_errors(&tokens),
            textblob_polarity,
            textblob_subjectivity,
        }
    }
}

/// Cheap misspelling heuristic, not a dictionary lookup.
///
/// A token counts as an error when it is longer than 3 characters, is not
/// purely alphabetic, and is not a stop word. Only the first 20 tokens are
/// inspected.
fn count_spelling_errors(tokens: &[String]) -> usize {
    tokens
        .iter()
        .take(SPELLING_SCAN_LIMIT)
        .filter(|t| {
            t.chars().count() > 3
                && !t.chars().all(|c| c.is_alphabetic())
                && !lexicon::is_stop_word(t)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::normalize;

    fn extract(text: &str) -> FeatureRecord {
        let normalized = normalize(text);
        FeatureExtractor::new().extract(text, &normalized)
    }

    #[test]
    fn test_empty_input_is_canonical() {
        assert_eq!(extract(""), FeatureRecord::empty());
        assert_eq!(extract("   \n\t"), FeatureRecord::empty());
    }

    #[test]
    fn test_basic_statistics() {
        let record = extract("barang ok. delivery cepat!");
        assert_eq!(record.word_count, 4);
        assert_eq!(record.exclamation_count, 1);
        assert_eq!(record.question_count, 0);
        // "barang ok" / " delivery cepat" / "" — split keeps the trailing
        // empty segment, matching the legacy behavior
        assert_eq!(record.sentence_count, 3);
        assert!(record.avg_word_length > 0.0);
    }

    #[test]
    fn test_malaysian_example_sentence() {
        let record = extract("Product bagus, delivery cepat, quality ok. Recommended!");
        assert!(record.malaysian_terms_count >= 2, "bagus/cepat/ok expected");
        assert!(record.product_terms_count >= 1, "delivery/quality expected");
        assert!(record.has_specific_details);
    }

    #[test]
    fn test_caps_ratio_policies() {
        let raw = "GOOD product LAH";
        let normalized = normalize(raw);

        let original = FeatureExtractor::new()
            .caps_source(CapsRatioSource::OriginalText)
            .extract(raw, &normalized);
        assert!(original.caps_ratio > 0.2);

        let lowered = FeatureExtractor::new()
            .caps_source(CapsRatioSource::NormalizedText)
            .extract(raw, &normalized);
        assert_eq!(lowered.caps_ratio, 0.0);
    }

    #[test]
    fn test_ratios_within_bounds() {
        let texts = [
            "bagus bagus bagus bagus",
            "the quick brown fox!!! ???",
            "delivery quality packaging size color",
            "x",
        ];
        for text in texts {
            let record = extract(text);
            for ratio in [
                record.caps_ratio,
                record.punctuation_ratio,
                record.malaysian_terms_ratio,
                record.product_terms_ratio,
            ] {
                assert!((0.0..=1.0).contains(&ratio), "ratio out of bounds for {text:?}");
            }
        }
    }

    #[test]
    fn test_repeated_words() {
        let record = extract("bagus bagus bagus murah murah");
        assert_eq!(record.word_count, 5);
        assert_eq!(record.repeated_words, 3);
    }

    #[test]
    fn test_spelling_errors_heuristic() {
        // "de4ls" is long, non-alphabetic, not a stop word
        let record = extract("amazing de4ls here p3rfect");
        assert_eq!(record.spelling_errors, 2);

        // purely alphabetic words never count
        let record = extract("perfectly normal sentence here");
        assert_eq!(record.spelling_errors, 0);
    }

    #[test]
    fn test_suspicious_phrase_flags() {
        let record = extract("Highly recommend, best product ever. Buy now!");
        assert!(record.has_generic_phrases);
        assert!(record.has_promotional_language);
    }

    #[test]
    fn test_mixed_language_flag() {
        let record = extract("barang ini memang best for everyday use");
        assert!(record.has_mixed_language);

        let record = extract("this product is excellent for the price");
        assert!(!record.has_mixed_language);
    }
}
