//! Risk and quality scoring.
//!
//! Pure functions over already-computed data: fake-probability tiers, a
//! 0-100 heuristic quality score, and suspicious-pattern tags. Nothing in
//! this module performs I/O or touches the classifier.

use serde::{Deserialize, Serialize};

use crate::features::FeatureRecord;

/// Final REAL/FAKE call for one text, plus the degraded labels the engine
/// emits when no real prediction was possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Real,
    Fake,
    /// Prediction failed; the carrying result holds the error message.
    Error,
    /// Prediction was never attempted (engine not loaded).
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
            Verdict::Error => "ERROR",
            Verdict::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// Discretized fake-probability tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Tier boundaries are closed on the lower side and total over [0, 1]:
    /// `>= 0.8` High, `>= 0.6` Medium, `>= 0.4` Low, else Minimal.
    pub fn from_fake_probability(fake_probability: f64) -> Self {
        if fake_probability >= 0.8 {
            RiskLevel::High
        } else if fake_probability >= 0.6 {
            RiskLevel::Medium
        } else if fake_probability >= 0.4 {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Minimal => "MINIMAL",
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// Which quality-score formula to apply.
///
/// The two legacy scoring pipelines diverged: only the engine-side copy
/// grants the +5 bonus for a moderate sentiment compound. Both behaviors
/// stay selectable; neither is silently unified away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityScorePolicy {
    /// Full formula including the sentiment-window bonus.
    #[default]
    SentimentBonus,
    /// Lighter formula without the sentiment bonus.
    Plain,
}

/// Heuristic 0-100 text-quality score, independent of the classifier.
pub fn quality_score(record: &FeatureRecord, policy: QualityScorePolicy) -> u8 {
    let mut score: i32 = 50;

    if record.word_count >= 15 {
        score += 10;
    }
    if record.malaysian_terms_count > 0 {
        score += 15;
    }
    if record.has_mixed_language {
        score += 10;
    }
    if record.has_specific_details {
        score += 10;
    }
    if policy == QualityScorePolicy::SentimentBonus
        && (0.2..=0.8).contains(&record.sentiment_compound)
    {
        score += 5;
    }

    if record.exclamation_count > 5 {
        score -= 15;
    }
    if record.has_generic_phrases {
        score -= 10;
    }
    if record.has_promotional_language {
        score -= 15;
    }
    if record.caps_ratio > 0.2 {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

/// A suspicious texture detected in the feature record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspiciousPattern {
    GenericPhrases,
    PromotionalLanguage,
    ExcessivePunctuation,
    ExcessiveCaps,
    RepetitiveLanguage,
}

impl SuspiciousPattern {
    /// Wire tag for this pattern.
    pub fn tag(&self) -> &'static str {
        match self {
            SuspiciousPattern::GenericPhrases => "generic_phrases",
            SuspiciousPattern::PromotionalLanguage => "promotional_language",
            SuspiciousPattern::ExcessivePunctuation => "excessive_punctuation",
            SuspiciousPattern::ExcessiveCaps => "excessive_caps",
            SuspiciousPattern::RepetitiveLanguage => "repetitive_language",
        }
    }
}

/// Detected suspicious patterns, emitted in a fixed order.
pub fn suspicious_patterns(record: &FeatureRecord) -> Vec<SuspiciousPattern> {
    let mut patterns = Vec::new();

    if record.has_generic_phrases {
        patterns.push(SuspiciousPattern::GenericPhrases);
    }
    if record.has_promotional_language {
        patterns.push(SuspiciousPattern::PromotionalLanguage);
    }
    if record.exclamation_count > 5 {
        patterns.push(SuspiciousPattern::ExcessivePunctuation);
    }
    if record.caps_ratio > 0.2 {
        patterns.push(SuspiciousPattern::ExcessiveCaps);
    }
    if record.repeated_words as f64 > 0.3 * record.word_count as f64 {
        patterns.push(SuspiciousPattern::RepetitiveLanguage);
    }

    patterns
}
