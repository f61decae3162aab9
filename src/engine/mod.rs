//! The prediction engine.
//!
//! Owns the loaded classifier bundle and drives the full pipeline for one
//! or many texts: normalize, extract, vectorize, classify, score. The
//! engine is constructed once at process start and shared by reference;
//! prediction calls run fully in parallel, serialized only on the atomic
//! performance counters. Loading swaps the model slot under a write lock so
//! readers never observe a half-updated bundle.

pub mod result;

pub use result::*;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::analysis::lexicon::MixedLanguageProfile;
use crate::analysis::normalizer::normalize;
use crate::error::{Result, SahihError};
use crate::features::{CapsRatioSource, FeatureExtractor, FeatureRecord};
use crate::ml::bundle::{LoadedBundle, ModelBundle};
use crate::ml::vectorize::to_model_input;
use crate::ml::{CLASS_FAKE, CLASS_REAL, Classifier};
use crate::scoring::{
    QualityScorePolicy, RiskLevel, Verdict, quality_score, suspicious_patterns,
};

/// Engine configuration.
///
/// The policy fields reproduce the behavioral variants of the two legacy
/// scoring pipelines; the defaults select the documented policies.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum trimmed input length; shorter input takes the degraded path.
    pub min_text_len: usize,
    /// Maximum accepted input length in characters.
    pub max_text_len: usize,
    /// Hard cap on batch size.
    pub max_batch_size: usize,
    pub quality_policy: QualityScorePolicy,
    pub caps_source: CapsRatioSource,
    pub language_profile: MixedLanguageProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_text_len: 3,
            max_text_len: 5000,
            max_batch_size: 50,
            quality_policy: QualityScorePolicy::default(),
            caps_source: CapsRatioSource::default(),
            language_profile: MixedLanguageProfile::default(),
        }
    }
}

/// Debugging view of one text's trip through the feature pipeline.
#[derive(Debug, Clone)]
pub struct FeatureAnalysis {
    pub original_text: String,
    pub cleaned_text: String,
    pub features: FeatureRecord,
    pub quality_score: u8,
}

struct LoadedModel {
    bundle: LoadedBundle,
    path: PathBuf,
}

/// Thread-safe review-authenticity prediction engine.
pub struct PredictionEngine {
    config: EngineConfig,
    extractor: FeatureExtractor,
    model: RwLock<Option<Arc<LoadedModel>>>,
    counters: PerformanceCounters,
}

impl std::fmt::Debug for PredictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionEngine")
            .field("config", &self.config)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PredictionEngine {
    /// Create an unloaded engine with the built-in analyzers.
    pub fn new(config: EngineConfig) -> Self {
        let extractor = FeatureExtractor::new()
            .caps_source(config.caps_source)
            .language_profile(config.language_profile);
        Self::with_extractor(config, extractor)
    }

    /// Create an unloaded engine with a custom feature extractor.
    pub fn with_extractor(config: EngineConfig, extractor: FeatureExtractor) -> Self {
        PredictionEngine {
            config,
            extractor,
            model: RwLock::new(None),
            counters: PerformanceCounters::new(),
        }
    }

    /// Load (or replace) the classifier bundle.
    ///
    /// The bundle is read and validated before the write lock is taken, so
    /// a failed load leaves the current model serving and the engine state
    /// unchanged. On success the new bundle replaces the old atomically.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bundle = ModelBundle::load(path)?;
        let version = bundle.version.clone();

        let mut slot = self.model.write();
        *slot = Some(Arc::new(LoadedModel {
            bundle,
            path: path.to_path_buf(),
        }));
        drop(slot);

        tracing::info!(path = %path.display(), %version, "model bundle loaded");
        Ok(())
    }

    /// Whether a model bundle is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.read().is_some()
    }

    /// Score one review text.
    ///
    /// Total over all inputs: an unloaded engine, too-short input, or a
    /// classifier failure produce result-carrying outcomes rather than
    /// errors.
    pub fn predict(&self, text: &str) -> PredictionResult {
        let start = Instant::now();

        let model = self.model.read().clone();
        let Some(model) = model else {
            return PredictionResult::not_loaded(start.elapsed());
        };

        if text.chars().count() > self.config.max_text_len {
            return PredictionResult::failed(
                format!("text too long (maximum {} characters)", self.config.max_text_len),
                start.elapsed(),
            );
        }

        // Too-short is judged on the normalized text: punctuation-only
        // input like "!!!" collapses below the minimum and takes the
        // degraded path rather than reaching the classifier.
        let normalized = normalize(text);
        if text.trim().chars().count() < self.config.min_text_len
            || normalized.chars().count() < self.config.min_text_len
        {
            return PredictionResult::too_short(start.elapsed());
        }

        match self.predict_inner(&model, text, &normalized, start) {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "prediction failed");
                PredictionResult::failed(e.to_string(), start.elapsed())
            }
        }
    }

    fn predict_inner(
        &self,
        model: &LoadedModel,
        text: &str,
        normalized: &str,
        start: Instant,
    ) -> Result<PredictionResult> {
        let record = self.extractor.extract(text, normalized);

        let input = to_model_input(normalized, &record, &model.bundle.tfidf, &model.bundle.scaler)?;
        let proba = model.bundle.ensemble.predict_proba(&input)?;
        let label = model.bundle.ensemble.predict(&input)?;

        let fake_probability = proba[CLASS_FAKE];
        let real_probability = proba[CLASS_REAL];
        let confidence = fake_probability.max(real_probability);

        let analysis = PredictionAnalysis {
            word_count: record.word_count,
            sentiment_score: record.sentiment_compound,
            malaysian_terms: record.malaysian_terms_count,
            has_mixed_language: record.has_mixed_language,
            quality_score: quality_score(&record, self.config.quality_policy),
            suspicious_patterns: suspicious_patterns(&record),
        };
        let metadata = PredictionMetadata {
            text_length: text.chars().count(),
            processed_length: normalized.chars().count(),
            model_version: model.bundle.version.clone(),
            timestamp: Utc::now(),
        };

        let elapsed = start.elapsed();
        self.counters.record(elapsed);

        Ok(PredictionResult {
            prediction: if label == CLASS_FAKE {
                Verdict::Fake
            } else {
                Verdict::Real
            },
            confidence,
            fake_probability,
            real_probability,
            risk_level: RiskLevel::from_fake_probability(fake_probability),
            elapsed,
            reason: None,
            error: None,
            analysis: Some(analysis),
            metadata: Some(metadata),
        })
    }

    /// Score a batch of texts.
    ///
    /// Fails only when the batch exceeds the hard cap. Each text is scored
    /// independently and in parallel; a failing text becomes an error slot,
    /// not an aborted batch. Result slots preserve input order.
    pub fn predict_batch(&self, texts: &[String]) -> Result<BatchResult> {
        let start = Instant::now();
        if texts.len() > self.config.max_batch_size {
            return Err(SahihError::BatchTooLarge {
                len: texts.len(),
                max: self.config.max_batch_size,
            });
        }

        let results: Vec<PredictionResult> =
            texts.par_iter().map(|text| self.predict(text)).collect();

        let mut fake_count = 0usize;
        let mut real_count = 0usize;
        let mut error_count = 0usize;
        let mut confidence_sum = 0.0;
        for result in &results {
            match result.prediction {
                Verdict::Fake => {
                    fake_count += 1;
                    confidence_sum += result.confidence;
                }
                Verdict::Real => {
                    real_count += 1;
                    confidence_sum += result.confidence;
                }
                Verdict::Error | Verdict::Unknown => error_count += 1,
            }
        }

        let valid = results.len() - error_count;
        let statistics = BatchStatistics {
            total: results.len(),
            fake_count,
            real_count,
            error_count,
            avg_confidence: if valid > 0 {
                confidence_sum / valid as f64
            } else {
                0.0
            },
            fake_percentage: if valid > 0 {
                fake_count as f64 / valid as f64 * 100.0
            } else {
                0.0
            },
            processing_time: start.elapsed(),
        };

        Ok(BatchResult {
            results,
            statistics,
        })
    }

    /// Health snapshot; never fails.
    pub fn health(&self) -> HealthStatus {
        let loaded = self.is_loaded();
        HealthStatus {
            status: if loaded { "healthy" } else { "unhealthy" }.to_string(),
            model_loaded: loaded,
            components: ComponentStatus {
                model: loaded,
                vectorizer: loaded,
                scaler: loaded,
                sentiment: true,
            },
            performance: self.stats(),
            version: crate::VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Performance-counter snapshot.
    pub fn stats(&self) -> PerformanceSnapshot {
        let (total_predictions, total_prediction_time) = self.counters.totals();
        let average_prediction_time = if total_predictions > 0 {
            total_prediction_time.div_f64(total_predictions as f64)
        } else {
            std::time::Duration::ZERO
        };

        let model = self.model.read();
        PerformanceSnapshot {
            total_predictions,
            total_prediction_time,
            average_prediction_time,
            model_loaded: model.is_some(),
            model_path: model.as_ref().map(|m| m.path.clone()),
        }
    }

    /// Run only the feature pipeline for one text, for debugging.
    ///
    /// Works without a loaded model.
    pub fn analyze_features(&self, text: &str) -> FeatureAnalysis {
        let cleaned_text = normalize(text);
        let features = self.extractor.extract(text, &cleaned_text);
        let quality_score = quality_score(&features, self.config.quality_policy);

        FeatureAnalysis {
            original_text: text.to_string(),
            cleaned_text,
            features,
            quality_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_engine_predicts_unknown() {
        let engine = PredictionEngine::default();
        let result = engine.predict("this review is long enough to classify");
        assert_eq!(result.prediction, Verdict::Unknown);
        assert!(result.error.is_some());
        assert!(result.is_error());
    }

    #[test]
    fn test_unloaded_health() {
        let engine = PredictionEngine::default();
        let health = engine.health();
        assert_eq!(health.status, "unhealthy");
        assert!(!health.model_loaded);
        assert!(!health.components.model);
        assert!(health.components.sentiment);
        assert_eq!(health.performance.total_predictions, 0);
    }

    #[test]
    fn test_analyze_features_without_model() {
        let engine = PredictionEngine::default();
        let analysis = engine.analyze_features("Barang bagus, delivery cepat!");
        assert!(analysis.features.malaysian_terms_count >= 2);
        assert_eq!(analysis.cleaned_text, "barang bagus, delivery cepat!");
        assert!(analysis.quality_score >= 50);
    }

    #[test]
    fn test_batch_cap_enforced_even_when_unloaded() {
        let engine = PredictionEngine::default();
        let texts: Vec<String> = (0..51).map(|i| format!("review {i}")).collect();
        assert!(matches!(
            engine.predict_batch(&texts),
            Err(SahihError::BatchTooLarge { len: 51, max: 50 })
        ));
    }
}
