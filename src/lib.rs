//! # Sahih
//!
//! Authenticity scoring for short product-review texts, tuned for Malaysian
//! e-commerce language (English/Malay code-mixing, local slang).
//!
//! ## Features
//!
//! - Deterministic text normalization and tokenization
//! - Closed-schema linguistic feature extraction
//! - Fixed-order feature vectorization against a trained classifier bundle
//! - Risk tiers, quality scores, and suspicious-pattern tagging
//! - Thread-safe prediction engine with running performance counters
//!
//! The trained classifier itself (ensemble model, TF-IDF vectorizer, feature
//! scaler) is an external artifact loaded from a serialized bundle; this
//! crate defines the contract it must satisfy and drives it.

pub mod analysis;
pub mod engine;
pub mod error;
pub mod features;
pub mod ml;
pub mod scoring;

pub mod prelude {
    pub use crate::engine::{EngineConfig, PredictionEngine, PredictionResult};
    pub use crate::error::{Result, SahihError};
    pub use crate::scoring::{RiskLevel, Verdict};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
