//! Text analysis module for Sahih.
//!
//! This module provides the deterministic front half of the scoring
//! pipeline: text normalization, tokenization, lexicon matching, and the
//! sentiment/polarity analyzer seams.

pub mod lexicon;
pub mod normalizer;
pub mod sentiment;
pub mod tokenizer;

// Re-export commonly used types
pub use lexicon::*;
pub use normalizer::*;
pub use sentiment::*;
pub use tokenizer::*;
