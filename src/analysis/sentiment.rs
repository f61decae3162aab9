//! Sentiment and polarity analyzer seams.
//!
//! The feature extractor treats sentiment scoring as an external
//! collaborator: any VADER-style analyzer can be plugged in through
//! [`SentimentAnalyzer`], and any TextBlob-style polarity/subjectivity
//! analyzer through [`PolarityAnalyzer`]. Lightweight lexicon-backed
//! implementations ship with the crate so the pipeline runs stand-alone;
//! analyzer failures are absorbed by the extractor with neutral defaults.

use std::sync::LazyLock;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// VADER-style polarity scores for a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    /// Normalized aggregate score in roughly [-1, 1].
    pub compound: f64,
    /// Positive proportion in [0, 1].
    pub positive: f64,
    /// Negative proportion in [0, 1].
    pub negative: f64,
    /// Neutral proportion in [0, 1].
    pub neutral: f64,
}

impl SentimentScores {
    /// The degraded default used when no analyzer output is available.
    pub fn neutral_default() -> Self {
        SentimentScores {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 0.5,
        }
    }
}

/// Trait for VADER-style sentiment analyzers.
pub trait SentimentAnalyzer: Send + Sync {
    /// Score the text's sentiment.
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores>;

    /// Get the name of this analyzer (for health reporting).
    fn name(&self) -> &'static str;
}

/// Trait for TextBlob-style polarity/subjectivity analyzers.
pub trait PolarityAnalyzer: Send + Sync {
    /// Return `(polarity, subjectivity)` for the text, with polarity in
    /// [-1, 1] and subjectivity in [0, 1].
    fn analyze(&self, text: &str) -> Result<(f64, f64)>;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "love", "amazing", "wonderful", "happy", "fantastic", "awesome",
    "best", "nice", "perfect", "recommend", "bagus", "cantik", "murah", "mantap", "shiok", "syok",
    "padu", "gempak", "steady", "tiptop", "baik", "elok", "lawa", "cepat",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "horrible", "worst", "sad", "angry", "disappointed",
    "poor", "broken", "slow", "fake", "teruk", "rosak", "lambat", "mahal", "tipu", "hampeh",
];

static POSITIVE_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| POSITIVE_WORDS.iter().copied().collect());

static NEGATIVE_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| NEGATIVE_WORDS.iter().copied().collect());

/// Normalization constant from VADER's compound-score formula.
const COMPOUND_ALPHA: f64 = 15.0;

fn hit_counts(text: &str) -> (f64, f64, usize) {
    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut total = 0usize;

    for word in text.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        total += 1;
        if POSITIVE_SET.contains(word) {
            positive += 1;
        } else if NEGATIVE_SET.contains(word) {
            negative += 1;
        }
    }

    (positive as f64, negative as f64, total)
}

/// Lexicon-backed sentiment analyzer.
///
/// Counts positive/negative term hits over a whitespace split and derives
/// VADER-shaped proportions; the compound score uses VADER's
/// `x / sqrt(x^2 + alpha)` normalization.
#[derive(Clone, Debug, Default)]
pub struct LexiconSentimentAnalyzer;

impl LexiconSentimentAnalyzer {
    /// Create a new lexicon sentiment analyzer.
    pub fn new() -> Self {
        LexiconSentimentAnalyzer
    }
}

impl SentimentAnalyzer for LexiconSentimentAnalyzer {
    fn polarity_scores(&self, text: &str) -> Result<SentimentScores> {
        let (positive, negative, total) = hit_counts(text);
        if total == 0 {
            return Ok(SentimentScores::neutral_default());
        }

        let balance = positive - negative;
        let compound = balance / (balance * balance + COMPOUND_ALPHA).sqrt();
        let positive = positive / total as f64;
        let negative = negative / total as f64;
        let neutral = (1.0 - positive - negative).max(0.0);

        Ok(SentimentScores {
            compound,
            positive,
            negative,
            neutral,
        })
    }

    fn name(&self) -> &'static str {
        "lexicon_sentiment"
    }
}

/// Lexicon-backed polarity/subjectivity analyzer.
#[derive(Clone, Debug, Default)]
pub struct LexiconPolarityAnalyzer;

impl LexiconPolarityAnalyzer {
    /// Create a new lexicon polarity analyzer.
    pub fn new() -> Self {
        LexiconPolarityAnalyzer
    }
}

impl PolarityAnalyzer for LexiconPolarityAnalyzer {
    fn analyze(&self, text: &str) -> Result<(f64, f64)> {
        let (positive, negative, total) = hit_counts(text);
        if total == 0 {
            return Ok((0.0, 0.5));
        }

        let hits = positive + negative;
        let polarity = if hits == 0.0 {
            0.0
        } else {
            (positive - negative) / hits
        };
        let subjectivity = (hits / total as f64).clamp(0.0, 1.0);

        Ok((polarity, subjectivity))
    }

    fn name(&self) -> &'static str {
        "lexicon_polarity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_on_empty() {
        let analyzer = LexiconSentimentAnalyzer::new();
        let scores = analyzer.polarity_scores("").unwrap();
        assert_eq!(scores, SentimentScores::neutral_default());
    }

    #[test]
    fn test_positive_text() {
        let analyzer = LexiconSentimentAnalyzer::new();
        let scores = analyzer.polarity_scores("good product, bagus quality").unwrap();
        assert!(scores.compound > 0.0);
        assert!(scores.positive > 0.0);
        assert_eq!(scores.negative, 0.0);
        assert!(scores.neutral >= 0.0 && scores.neutral <= 1.0);
    }

    #[test]
    fn test_negative_text() {
        let analyzer = LexiconSentimentAnalyzer::new();
        let scores = analyzer.polarity_scores("teruk, broken and slow").unwrap();
        assert!(scores.compound < 0.0);
        assert!(scores.negative > 0.0);
    }

    #[test]
    fn test_compound_bounded() {
        let analyzer = LexiconSentimentAnalyzer::new();
        let text = "good ".repeat(100);
        let scores = analyzer.polarity_scores(&text).unwrap();
        assert!(scores.compound > 0.9 && scores.compound <= 1.0);
    }

    #[test]
    fn test_polarity_analyzer() {
        let analyzer = LexiconPolarityAnalyzer::new();
        assert_eq!(analyzer.analyze("").unwrap(), (0.0, 0.5));

        let (polarity, subjectivity) = analyzer.analyze("best product").unwrap();
        assert_eq!(polarity, 1.0);
        assert!(subjectivity > 0.0);

        let (polarity, _) = analyzer.analyze("worst product").unwrap();
        assert_eq!(polarity, -1.0);
    }
}
