//! Tokenizer implementations for text analysis.

use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

/// Trait for tokenizers that convert text into a word sequence.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into words.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Get the name of this tokenizer (for debugging and health reporting).
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on Unicode word boundaries (UAX #29).
///
/// This is the primary tokenizer. Punctuation and whitespace segments are
/// filtered out, leaving only word tokens.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.unicode_words().map(|w| w.to_string()).collect())
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}

/// A tokenizer that splits text on whitespace.
///
/// Functionally equivalent fallback for the feature pipeline: whichever
/// tokenizer is in use, the downstream counting logic operates on plain
/// word sequences.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(|w| w.to_string()).collect())
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Tokenize with the given tokenizer, falling back to a whitespace split if
/// it fails. The feature pipeline must never fail on tokenization.
pub fn tokenize_or_split(tokenizer: &dyn Tokenizer, text: &str) -> Vec<String> {
    tokenizer
        .tokenize(text)
        .unwrap_or_else(|_| text.split_whitespace().map(|w| w.to_string()).collect())
}
