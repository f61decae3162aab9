//! End-to-end scenarios for the prediction engine: loading model bundles
//! from disk, scoring single texts and batches, degraded paths, and the
//! shared performance counters.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use serde_json::json;
use tempfile::NamedTempFile;

use sahih::engine::{EngineConfig, PredictionEngine};
use sahih::error::SahihError;
use sahih::ml::vectorize::DENSE_FEATURE_COUNT;
use sahih::scoring::{RiskLevel, Verdict};

/// A two-term vocabulary bundle whose single linear member puts all its
/// weight on the vocabulary columns, so the verdict is driven entirely by
/// how often "scam" and "tipu" appear.
fn bundle_json(term_weight: f64, bias: f64, version: &str) -> serde_json::Value {
    let mut weights = vec![term_weight, term_weight];
    weights.extend(std::iter::repeat(0.0).take(DENSE_FEATURE_COUNT));
    json!({
        "models": { "ensemble": { "members": [{ "weights": weights, "bias": bias }] } },
        "vectorizers": { "tfidf": { "vocabulary": { "scam": 0, "tipu": 1 }, "idf": [1.0, 1.0] } },
        "scaler": {
            "mean": vec![0.0; DENSE_FEATURE_COUNT],
            "std": vec![1.0; DENSE_FEATURE_COUNT],
        },
        "metadata": { "version": version },
    })
}

fn write_bundle(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut file, value).unwrap();
    file.flush().unwrap();
    file
}

fn loaded_engine() -> PredictionEngine {
    let file = write_bundle(&bundle_json(10.0, -2.0, "2.1"));
    let engine = PredictionEngine::new(EngineConfig::default());
    engine.load(file.path()).unwrap();
    engine
}

const CLEAN_REVIEW: &str = "barang ini memang bagus dan penghantaran sangat cepat";
const SCAM_REVIEW: &str = "scam scam scam tipu tipu please avoid";

#[test]
fn loaded_engine_reports_healthy() {
    let engine = loaded_engine();
    assert!(engine.is_loaded());

    let health = engine.health();
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded);
    assert!(health.components.model);
    assert!(health.components.vectorizer);
    assert!(health.components.scaler);
    assert!(health.components.sentiment);

    let stats = engine.stats();
    assert!(stats.model_loaded);
    assert!(stats.model_path.is_some());
    assert_eq!(stats.total_predictions, 0);
}

#[test]
fn clean_review_classified_as_real() {
    let engine = loaded_engine();
    let result = engine.predict(CLEAN_REVIEW);

    assert_eq!(result.prediction, Verdict::Real);
    assert_eq!(result.risk_level, RiskLevel::Minimal);
    assert!(result.real_probability > 0.5);
    assert!((result.fake_probability + result.real_probability - 1.0).abs() < 1e-9);
    assert_eq!(
        result.confidence,
        result.fake_probability.max(result.real_probability)
    );
    assert!(result.error.is_none());
    assert!(result.reason.is_none());

    let analysis = result.analysis.unwrap();
    assert!(analysis.word_count >= 7);
    assert!(analysis.malaysian_terms >= 2);

    let metadata = result.metadata.unwrap();
    assert_eq!(metadata.model_version, "2.1");
    assert_eq!(metadata.text_length, CLEAN_REVIEW.chars().count());
}

#[test]
fn scam_heavy_review_classified_as_fake() {
    let engine = loaded_engine();
    let result = engine.predict(SCAM_REVIEW);

    assert_eq!(result.prediction, Verdict::Fake);
    assert!(result.fake_probability > 0.9);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(!result.is_error());
}

#[test]
fn punctuation_only_input_takes_degraded_path() {
    let engine = loaded_engine();
    let result = engine.predict("!!!");

    assert_eq!(result.prediction, Verdict::Real);
    assert_eq!(result.risk_level, RiskLevel::Minimal);
    assert_eq!(result.fake_probability, 0.1);
    assert_eq!(result.real_probability, 0.9);
    assert_eq!(result.confidence, 0.5);
    assert!(result.reason.is_some());
    assert!(result.error.is_none());
    assert_eq!(result.analysis.unwrap().word_count, 0);
    assert!(result.metadata.is_none());

    // Degraded answers never touch the counters.
    assert_eq!(engine.stats().total_predictions, 0);
}

#[test]
fn overlong_input_becomes_error_result() {
    let engine = loaded_engine();
    let result = engine.predict(&"a".repeat(6000));

    assert_eq!(result.prediction, Verdict::Error);
    assert!(result.is_error());
    assert!(result.error.unwrap().contains("too long"));
    assert_eq!(engine.stats().total_predictions, 0);
}

#[test]
fn counters_advance_only_on_classified_predictions() {
    let engine = loaded_engine();
    engine.predict(CLEAN_REVIEW);
    engine.predict(SCAM_REVIEW);
    engine.predict("!!!");
    engine.predict(&"a".repeat(6000));

    let stats = engine.stats();
    assert_eq!(stats.total_predictions, 2);
    assert!(stats.average_prediction_time <= stats.total_prediction_time);

    // average * count reproduces the total (up to nanosecond rounding)
    let reconstructed = stats.average_prediction_time * 2;
    let drift = if reconstructed > stats.total_prediction_time {
        reconstructed - stats.total_prediction_time
    } else {
        stats.total_prediction_time - reconstructed
    };
    assert!(drift <= std::time::Duration::from_nanos(2));
}

#[test]
fn batch_preserves_order_and_aggregates() {
    let engine = loaded_engine();
    let texts = vec![
        SCAM_REVIEW.to_string(),
        CLEAN_REVIEW.to_string(),
        "!!".to_string(),
        "a".repeat(6000),
    ];

    let batch = engine.predict_batch(&texts).unwrap();
    assert_eq!(batch.results.len(), 4);
    assert_eq!(batch.results[0].prediction, Verdict::Fake);
    assert_eq!(batch.results[1].prediction, Verdict::Real);
    assert_eq!(batch.results[2].prediction, Verdict::Real);
    assert_eq!(batch.results[3].prediction, Verdict::Error);

    let stats = &batch.statistics;
    assert_eq!(stats.total, 4);
    assert_eq!(stats.fake_count, 1);
    assert_eq!(stats.real_count, 2);
    assert_eq!(stats.error_count, 1);
    assert!((stats.fake_percentage - 100.0 / 3.0).abs() < 1e-9);
    assert!(stats.avg_confidence > 0.0);
}

#[test]
fn batch_at_cap_succeeds_and_one_over_fails() {
    let engine = loaded_engine();

    let full: Vec<String> = (0..50)
        .map(|i| format!("barang bagus dan cepat sampai nombor {i}"))
        .collect();
    let batch = engine.predict_batch(&full).unwrap();
    assert_eq!(batch.results.len(), 50);
    assert_eq!(batch.statistics.error_count, 0);

    let over: Vec<String> = (0..51).map(|i| format!("review nombor {i}")).collect();
    assert!(matches!(
        engine.predict_batch(&over),
        Err(SahihError::BatchTooLarge { len: 51, max: 50 })
    ));
}

#[test]
fn concurrent_predictions_count_exactly() {
    let engine = Arc::new(loaded_engine());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..125 {
                    let result = engine.predict(CLEAN_REVIEW);
                    assert_eq!(result.prediction, Verdict::Real);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.stats().total_predictions, 1000);
}

#[test]
fn reload_replaces_model_in_place() {
    let engine = loaded_engine();
    assert_eq!(engine.predict(CLEAN_REVIEW).prediction, Verdict::Real);

    // A member with zero term weights and positive bias flags everything.
    let replacement = write_bundle(&bundle_json(0.0, 3.0, "3.0"));
    engine.load(replacement.path()).unwrap();

    let result = engine.predict(CLEAN_REVIEW);
    assert_eq!(result.prediction, Verdict::Fake);
    assert_eq!(result.metadata.unwrap().model_version, "3.0");
}

#[test]
fn failed_load_keeps_previous_model() {
    let engine = loaded_engine();
    assert!(engine.load("/no/such/bundle.json").is_err());
    assert!(engine.is_loaded());
    assert_eq!(engine.predict(CLEAN_REVIEW).prediction, Verdict::Real);
}

#[test]
fn load_missing_file_on_fresh_engine() {
    let engine = PredictionEngine::default();
    assert!(matches!(
        engine.load("/no/such/bundle.json"),
        Err(SahihError::NotFound(_))
    ));
    assert!(!engine.is_loaded());
}

#[test]
fn malformed_bundle_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"definitely not json").unwrap();
    file.flush().unwrap();

    let engine = PredictionEngine::default();
    assert!(matches!(
        engine.load(file.path()),
        Err(SahihError::Deserialize(_))
    ));
    assert!(!engine.is_loaded());
}

#[test]
fn bundle_missing_scaler_rejected() {
    let mut value = bundle_json(10.0, -2.0, "2.1");
    value.as_object_mut().unwrap().remove("scaler");
    let file = write_bundle(&value);

    let engine = PredictionEngine::default();
    assert!(matches!(
        engine.load(file.path()),
        Err(SahihError::IncompleteModel(_))
    ));
    assert!(!engine.is_loaded());
}

#[test]
fn mismatched_ensemble_dimension_rejected() {
    let mut value = bundle_json(10.0, -2.0, "2.1");
    value["models"]["ensemble"]["members"][0]["weights"] = json!([1.0, 2.0, 3.0]);
    let file = write_bundle(&value);

    let engine = PredictionEngine::default();
    assert!(matches!(
        engine.load(file.path()),
        Err(SahihError::IncompleteModel(_))
    ));
}
