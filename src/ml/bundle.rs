//! Serialized model bundle handling.
//!
//! A bundle is one JSON document bundling everything the engine needs:
//! the ensemble classifier, the TF-IDF vectorizer, and the feature scaler,
//! plus optional informational sections. Unknown keys are ignored so newer
//! trainers can add sections without breaking older readers.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SahihError};
use crate::ml::TextVectorizer;
use crate::ml::ensemble::SoftVotingEnsemble;
use crate::ml::scaler::StandardScaler;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::ml::vectorize::{BINARY_FEATURE_ORDER, FEATURE_ORDER};

/// On-disk bundle layout.
///
/// `models.ensemble`, `vectorizers.tfidf`, and `scaler` are mandatory;
/// `feature_names`, `detector`, and `metadata` are tolerated when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    #[serde(default)]
    pub models: ModelSection,
    #[serde(default)]
    pub vectorizers: VectorizerSection,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
    /// Feature names the trainer recorded, used as a cross-check only.
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Opaque feature-extractor settings from the trainer; unused here.
    #[serde(default)]
    pub detector: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: Option<BundleMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    #[serde(default)]
    pub ensemble: Option<SoftVotingEnsemble>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorizerSection {
    #[serde(default)]
    pub tfidf: Option<TfIdfVectorizer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleMetadata {
    #[serde(default)]
    pub version: Option<String>,
}

/// A validated, ready-to-serve bundle.
#[derive(Debug, Clone)]
pub struct LoadedBundle {
    pub ensemble: SoftVotingEnsemble,
    pub tfidf: TfIdfVectorizer,
    pub scaler: StandardScaler,
    /// Trainer-reported model version, defaulting to "1.0".
    pub version: String,
}

impl ModelBundle {
    /// Read and validate a bundle from disk.
    ///
    /// The file handle is scoped to this call and released on every exit
    /// path. Fails with `NotFound` when the path does not resolve,
    /// `Deserialize` on malformed JSON, and `IncompleteModel` when any of
    /// the three mandatory components is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedBundle> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SahihError::not_found(path.display().to_string()));
        }

        let file = File::open(path)?;
        let bundle: ModelBundle = serde_json::from_reader(BufReader::new(file))?;
        bundle.into_loaded()
    }

    /// Validate completeness and strip the optional wrapping.
    pub fn into_loaded(self) -> Result<LoadedBundle> {
        let ensemble = self
            .models
            .ensemble
            .ok_or_else(|| SahihError::incomplete_model("missing models.ensemble"))?;
        let tfidf = self
            .vectorizers
            .tfidf
            .ok_or_else(|| SahihError::incomplete_model("missing vectorizers.tfidf"))?;
        let scaler = self
            .scaler
            .ok_or_else(|| SahihError::incomplete_model("missing scaler"))?;

        // serde bypasses the constructors, so invariants are re-checked here
        ensemble.validate()?;
        tfidf.validate()?;
        scaler.validate()?;

        let expected_dim = tfidf.dimension() + scaler.dimension();
        if ensemble.dimension() != expected_dim {
            return Err(SahihError::incomplete_model(format!(
                "ensemble expects {} inputs but tfidf + scaler provide {}",
                ensemble.dimension(),
                expected_dim
            )));
        }

        if !self.feature_names.is_empty() {
            let expected: Vec<&str> = FEATURE_ORDER
                .iter()
                .chain(BINARY_FEATURE_ORDER.iter())
                .copied()
                .collect();
            if self.feature_names != expected {
                tracing::warn!(
                    recorded = self.feature_names.len(),
                    expected = expected.len(),
                    "bundle feature_names differ from the built-in feature order"
                );
            }
        }

        let version = self
            .metadata
            .and_then(|m| m.version)
            .unwrap_or_else(|| "1.0".to_string());

        Ok(LoadedBundle {
            ensemble,
            tfidf,
            scaler,
            version,
        })
    }
}
