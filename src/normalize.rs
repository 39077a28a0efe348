// src/normalize.rs
// Text canonicalization and phonetic encoding for catalog name fields.

use once_cell::sync::Lazy;
use rphonetic::{DoubleMetaphone, Encoder};

static DOUBLE_METAPHONE: Lazy<DoubleMetaphone> = Lazy::new(DoubleMetaphone::default);

/// Canonicalizes a name field for exact comparison: lowercased, every
/// non-alphanumeric character removed. Missing input yields the empty string.
/// Idempotent, so re-normalizing an already normalized value is a no-op.
pub fn normalize_text(text: Option<&str>) -> String {
    match text {
        Some(text) => text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect(),
        None => String::new(),
    }
}

/// Double Metaphone code for a name field; missing input yields the empty
/// string. The encoder builds its primary and alternate codes in parallel,
/// so the primary code is empty only for input with no encodable letters,
/// where the alternate is empty as well.
pub fn phonetic_encode(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let folded = fold_for_phonetics(text);
    if folded.is_empty() {
        return String::new();
    }
    DOUBLE_METAPHONE.encode(&folded)
}

/// Two codes match only under exact string equality. Two empty codes also
/// match: a record with a missing name compares as phonetically equal to
/// another record with a missing name.
pub fn phonetic_equal(a: &str, b: &str) -> bool {
    a == b
}

/// Reduces text to ASCII letters and single spaces before phonetic encoding,
/// which keeps the encoder away from input it cannot handle.
fn fold_for_phonetics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        for lc in ch.to_lowercase() {
            if lc.is_ascii_alphabetic() {
                out.push(lc);
            } else if lc.is_whitespace() && !out.ends_with(' ') && !out.is_empty() {
                out.push(' ');
            }
        }
    }
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out
}
