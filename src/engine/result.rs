//! Result, health, and counter types for the prediction engine.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{RiskLevel, SuspiciousPattern, Verdict};

/// Why a prediction was answered with a degraded sentinel instead of a
/// classifier call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegradedReason {
    /// Trimmed input was below the minimum length.
    TooShort,
}

/// Per-text analysis attached to successful predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionAnalysis {
    pub word_count: usize,
    /// Sentiment compound score of the analyzed text.
    pub sentiment_score: f64,
    pub malaysian_terms: usize,
    pub has_mixed_language: bool,
    /// Heuristic 0-100 quality score (independent of the classifier).
    pub quality_score: u8,
    pub suspicious_patterns: Vec<SuspiciousPattern>,
}

impl PredictionAnalysis {
    /// The minimal analysis attached to degraded sentinels.
    pub fn empty() -> Self {
        PredictionAnalysis {
            word_count: 0,
            sentiment_score: 0.0,
            malaysian_terms: 0,
            has_mixed_language: false,
            quality_score: 0,
            suspicious_patterns: Vec::new(),
        }
    }
}

/// Diagnostic metadata attached to successful predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionMetadata {
    /// Character length of the raw input.
    pub text_length: usize,
    /// Character length after normalization.
    pub processed_length: usize,
    /// Version string the model bundle reported.
    pub model_version: String,
    pub timestamp: DateTime<Utc>,
}

/// The outcome of one prediction call.
///
/// `predict` is total: failed or degraded calls produce a result carrying
/// the failure, never an error return. Created once per call and immutable
/// afterwards; the engine does not persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Verdict,
    /// `max(fake_probability, real_probability)`; 0 on failure.
    pub confidence: f64,
    pub fake_probability: f64,
    pub real_probability: f64,
    pub risk_level: RiskLevel,
    /// Wall time from call entry to return.
    pub elapsed: Duration,
    /// Set when the result is a degraded sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DegradedReason>,
    /// Set when the prediction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PredictionAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PredictionMetadata>,
}

impl PredictionResult {
    /// The benign low-risk sentinel for too-short input.
    pub fn too_short(elapsed: Duration) -> Self {
        PredictionResult {
            prediction: Verdict::Real,
            confidence: 0.5,
            fake_probability: 0.1,
            real_probability: 0.9,
            risk_level: RiskLevel::Minimal,
            elapsed,
            reason: Some(DegradedReason::TooShort),
            error: None,
            analysis: Some(PredictionAnalysis::empty()),
            metadata: None,
        }
    }

    /// Result for a predict call against an unloaded engine.
    pub fn not_loaded(elapsed: Duration) -> Self {
        PredictionResult {
            prediction: Verdict::Unknown,
            confidence: 0.0,
            fake_probability: 0.0,
            real_probability: 0.0,
            risk_level: RiskLevel::Minimal,
            elapsed,
            reason: None,
            error: Some("model not loaded".to_string()),
            analysis: None,
            metadata: None,
        }
    }

    /// Result carrying a prediction-path failure.
    pub fn failed(message: impl Into<String>, elapsed: Duration) -> Self {
        PredictionResult {
            prediction: Verdict::Error,
            confidence: 0.0,
            fake_probability: 0.0,
            real_probability: 0.0,
            risk_level: RiskLevel::Minimal,
            elapsed,
            reason: None,
            error: Some(message.into()),
            analysis: None,
            metadata: None,
        }
    }

    /// True when this slot carries no usable verdict.
    pub fn is_error(&self) -> bool {
        matches!(self.prediction, Verdict::Error | Verdict::Unknown)
    }
}

/// Aggregate statistics over one batch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub fake_count: usize,
    pub real_count: usize,
    pub error_count: usize,
    /// Mean confidence over non-error entries; 0 when none succeeded.
    pub avg_confidence: f64,
    /// Percentage of FAKE verdicts over non-error entries.
    pub fake_percentage: f64,
    pub processing_time: Duration,
}

/// One batch call's results plus statistics. Result slots are in input
/// order, one per text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<PredictionResult>,
    pub statistics: BatchStatistics,
}

/// Presence booleans for the engine's collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub model: bool,
    pub vectorizer: bool,
    pub scaler: bool,
    pub sentiment: bool,
}

/// Snapshot of the engine's health; never fails to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub components: ComponentStatus,
    pub performance: PerformanceSnapshot,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Point-in-time view of the performance counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub total_predictions: u64,
    pub total_prediction_time: Duration,
    /// Mean time per successful prediction; zero before the first one.
    pub average_prediction_time: Duration,
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
}

/// Process-lifetime running totals, shared across all concurrent
/// prediction calls. Incremented lock-free on every successful prediction;
/// reset only by process restart.
#[derive(Debug, Default)]
pub struct PerformanceCounters {
    count: AtomicU64,
    total_micros: AtomicU64,
}

impl PerformanceCounters {
    /// Create zeroed counters.
    pub fn new() -> Self {
        PerformanceCounters::default()
    }

    /// Record one successful prediction.
    pub fn record(&self, elapsed: Duration) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.total_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Read the current totals.
    pub fn totals(&self) -> (u64, Duration) {
        let count = self.count.load(Ordering::Relaxed);
        let total = Duration::from_micros(self.total_micros.load(Ordering::Relaxed));
        (count, total)
    }
}
