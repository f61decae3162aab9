//! Text normalizer implementation.
//!
//! Deterministic cleanup of raw review text before feature extraction and
//! vectorization. The steps are order-sensitive and the whole pass is
//! idempotent: `normalize(normalize(t)) == normalize(t)` for all `t`.

use std::sync::LazyLock;

use regex::Regex;

/// URLs, email addresses, and Malaysian-style phone-number digit runs.
static CONTACT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http\S+|www\S+|https\S+|\S+@\S+|\+?6\d{1,3}-?\d{3,4}-?\d{3,4}")
        .expect("contact pattern should be valid")
});

static BANG_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!{2,}").expect("bang pattern should be valid"));

static QUESTION_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?{2,}").expect("question pattern should be valid"));

static DOT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}").expect("dot pattern should be valid"));

/// Everything outside the retained alphabet (applied after lower-casing).
static NOISE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s.,!?-]").expect("noise pattern should be valid"));

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should be valid"));

/// Normalize raw review text.
///
/// Each pass applies, in order:
/// 1. Strip URLs, emails, and phone-number-like digit runs.
/// 2. Collapse repeated `!` / `?` runs and 3+ `.` runs (to `...`).
/// 3. Collapse 3+ repeated identical letters to 2 ("sooooo" -> "soo").
/// 4. Strip characters outside `[a-z0-9 .,!?-]`.
/// 5. Collapse whitespace runs to a single space and trim.
///
/// The noise strip can expose new letter runs ("aa%a" -> "aaa") or new
/// phone-shaped digit runs ("6~123~4567" -> "61234567") that the earlier
/// steps would have caught, so the pass repeats until the text is stable.
/// Every rule shortens the text or leaves it alone, so the loop terminates.
///
/// Empty or whitespace-only input normalizes to the empty string, which all
/// downstream stages treat as a valid, minimal input.
pub fn normalize(text: &str) -> String {
    let mut text = text.to_lowercase().trim().to_string();
    loop {
        let pass = normalize_pass(&text);
        if pass == text {
            return pass;
        }
        text = pass;
    }
}

fn normalize_pass(text: &str) -> String {
    let text = CONTACT_PATTERN.replace_all(text, "");
    let text = BANG_RUNS.replace_all(&text, "!");
    let text = QUESTION_RUNS.replace_all(&text, "?");
    let text = DOT_RUNS.replace_all(&text, "...");
    let text = collapse_letter_runs(&text);
    let text = NOISE_CHARS.replace_all(&text, "");
    let text = WHITESPACE_RUNS.replace_all(&text, " ");

    text.trim().to_string()
}

/// Collapse runs of 3+ identical letters down to 2.
///
/// The regex crate has no backreferences, so this is a manual scan. Only
/// alphabetic characters are collapsed; digit and punctuation runs are
/// handled by the dedicated punctuation passes.
fn collapse_letter_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if c.is_alphabetic() && prev == Some(c) {
            run += 1;
            if run >= 3 {
                continue;
            }
        } else {
            run = 1;
        }
        prev = Some(c);
        out.push(c);
    }

    out
}
