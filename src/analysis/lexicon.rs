//! Static lexicons and matching logic for Malaysian review text.
//!
//! The term sets here are closed, versioned vocabulary shared with the
//! trained classifier: the counts and booleans they produce feed the model
//! input vector, so entries must not be added or reordered casually.

use std::sync::LazyLock;

use ahash::AHashSet;

/// Malaysian colloquial terms (Malay and local English slang).
pub const MALAYSIAN_TERMS: &[&str] = &[
    "shiok", "confirm", "steady", "power", "cantik", "lawa", "terror", "bagus", "teruk", "rosak",
    "murah", "baik", "elok", "mantap", "tiptop", "padu", "mmg", "sgt", "dia", "kt", "kat", "dah",
    "tak", "beli", "dapat", "sampai", "cepat", "lambat", "ok", "okay", "best", "nice", "cheap",
    "mahal", "syok", "gempak", "memang",
];

/// Product-quality vocabulary (concrete attributes a genuine reviewer
/// tends to mention).
pub const PRODUCT_TERMS: &[&str] = &[
    "delivery",
    "packaging",
    "quality",
    "size",
    "color",
    "material",
    "fitting",
    "comfort",
    "battery",
    "charge",
    "sound",
    "screen",
    "camera",
    "performance",
    "seller",
    "service",
    "price",
    "value",
    "texture",
    "durability",
    "functionality",
    "design",
    "weight",
];

/// Fixed suspicious phrases, matched as substrings of the normalized text.
///
/// Entries before [`GENERIC_PHRASE_SPLIT`] flag generic praise; entries from
/// the split onward flag promotional language.
pub const SUSPICIOUS_PHRASES: &[&str] = &[
    "highly recommend",
    "best product ever",
    "amazing quality",
    "exceeded expectations",
    "perfect product",
    "love it so much",
    "exactly what i needed",
    "great value for money",
    "buy now",
    "great deal",
    "discount",
    "sale",
    "limited time",
    "special offer",
];

/// Policy constant: index splitting [`SUSPICIOUS_PHRASES`] into the
/// generic-praise prefix and the promotional suffix. Fixed by the trained
/// classifier's feature semantics, never derived from the list length.
pub const GENERIC_PHRASE_SPLIT: usize = 8;

/// Malay function words used for mixed-language detection.
pub const MALAY_FUNCTION_WORDS: &[&str] =
    &["yang", "dan", "ini", "itu", "dengan", "untuk", "dari", "ke", "pada"];

/// English function words used for mixed-language detection.
pub const ENGLISH_FUNCTION_WORDS: &[&str] =
    &["the", "and", "this", "that", "with", "for", "from", "to", "on"];

/// English stop words excluded from the spelling-error heuristic.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "before", "being", "between", "both", "but", "by", "can", "did", "do", "does", "down",
    "for", "from", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "in",
    "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "out", "over", "own", "she", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "why", "will", "with", "you", "your",
];

static MALAYSIAN_TERMS_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| MALAYSIAN_TERMS.iter().copied().collect());

static PRODUCT_TERMS_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| PRODUCT_TERMS.iter().copied().collect());

static MALAY_FUNCTION_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| MALAY_FUNCTION_WORDS.iter().copied().collect());

static ENGLISH_FUNCTION_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_FUNCTION_WORDS.iter().copied().collect());

static ENGLISH_STOP_WORDS_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Which function-word lists drive mixed-language detection.
///
/// The two legacy scoring pipelines shipped lists of different length; both
/// remain reproducible. `Full` uses all nine words per language, `Compact`
/// the first seven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MixedLanguageProfile {
    /// Nine function words per language.
    #[default]
    Full,
    /// Seven function words per language (legacy inference-service lists).
    Compact,
}

impl MixedLanguageProfile {
    fn width(&self) -> usize {
        match self {
            MixedLanguageProfile::Full => MALAY_FUNCTION_WORDS.len(),
            MixedLanguageProfile::Compact => 7,
        }
    }

    /// Malay function words for this profile.
    pub fn malay_words(&self) -> &'static [&'static str] {
        &MALAY_FUNCTION_WORDS[..self.width()]
    }

    /// English function words for this profile.
    pub fn english_words(&self) -> &'static [&'static str] {
        &ENGLISH_FUNCTION_WORDS[..self.width()]
    }
}

/// Count tokens that are Malaysian colloquial terms.
pub fn malaysian_term_count(tokens: &[String]) -> usize {
    tokens
        .iter()
        .filter(|t| MALAYSIAN_TERMS_SET.contains(t.as_str()))
        .count()
}

/// Count tokens that are product-quality terms.
pub fn product_term_count(tokens: &[String]) -> usize {
    tokens
        .iter()
        .filter(|t| PRODUCT_TERMS_SET.contains(t.as_str()))
        .count()
}

/// Ratio of a term count to the word count; defined as 0 for empty input.
pub fn term_ratio(count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        0.0
    } else {
        count as f64 / word_count as f64
    }
}

/// True when the normalized text contains any generic-praise phrase.
pub fn has_generic_phrases(normalized: &str) -> bool {
    SUSPICIOUS_PHRASES[..GENERIC_PHRASE_SPLIT]
        .iter()
        .any(|phrase| normalized.contains(phrase))
}

/// True when the normalized text contains any promotional phrase.
pub fn has_promotional_language(normalized: &str) -> bool {
    SUSPICIOUS_PHRASES[GENERIC_PHRASE_SPLIT..]
        .iter()
        .any(|phrase| normalized.contains(phrase))
}

/// True when the token set contains function words from both languages.
pub fn detect_mixed_language(tokens: &[String], profile: MixedLanguageProfile) -> bool {
    let (malay, english) = match profile {
        MixedLanguageProfile::Full => (&*MALAY_FUNCTION_SET, &*ENGLISH_FUNCTION_SET),
        MixedLanguageProfile::Compact => {
            // Compact profile is a strict prefix; fall back to slice scans
            // rather than keeping a second pair of sets alive.
            let has_malay = tokens
                .iter()
                .any(|t| profile.malay_words().contains(&t.as_str()));
            let has_english = tokens
                .iter()
                .any(|t| profile.english_words().contains(&t.as_str()));
            return has_malay && has_english;
        }
    };

    let has_malay = tokens.iter().any(|t| malay.contains(t.as_str()));
    let has_english = tokens.iter().any(|t| english.contains(t.as_str()));
    has_malay && has_english
}

/// True when the word is an English stop word.
pub fn is_stop_word(word: &str) -> bool {
    ENGLISH_STOP_WORDS_SET.contains(word)
}
