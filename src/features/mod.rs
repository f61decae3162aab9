//! Linguistic feature extraction for review texts.
//!
//! A [`FeatureRecord`] is the closed-schema numeric/boolean representation
//! of one review text; [`FeatureExtractor`] produces it from normalized
//! text plus the external sentiment/polarity collaborators.

pub mod extractor;
pub mod record;

pub use extractor::*;
pub use record::*;
