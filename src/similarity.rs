// src/similarity.rs
// String similarity ratios and the weighted pair scorer.

use strsim::normalized_levenshtein;

use crate::models::core::NormalizedSku;
use crate::normalize::phonetic_equal;
use crate::utils::constants::{
    DISPLAY_NAME_WEIGHT, PAIR_SCORE_CEILING, PHONETIC_MATCH_BONUS, SKU_NAME_WEIGHT,
};

/// Normalized edit-distance similarity on a 0-100 scale. 100 for identical
/// strings (including two empty strings), 0 for completely dissimilar ones.
pub fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b) * 100.0
}

/// Best similarity of the shorter string against every same-length substring
/// of the longer one, on a 0-100 scale. An empty needle only matches an empty
/// haystack.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };
    if needle.is_empty() {
        return if haystack.is_empty() { 100.0 } else { 0.0 };
    }

    let needle_str: String = needle.iter().collect();
    let mut best: f64 = 0.0;
    for window in haystack.windows(needle.len()) {
        let candidate: String = window.iter().collect();
        let sim = normalized_levenshtein(&needle_str, &candidate);
        if sim > best {
            best = sim;
        }
        if best >= 1.0 {
            break;
        }
    }
    best * 100.0
}

/// Weighted similarity between two normalized records:
/// a quarter each for the SKU-name and display-name ratios, plus a flat
/// bonus per matching phonetic code. The clamp keeps the result on the
/// 100-point scale, though with these weights the score tops out at 80.
/// Symmetric in its arguments.
pub fn score_pair(a: &NormalizedSku, b: &NormalizedSku) -> f64 {
    let name_sim = ratio(&a.normalized_sku_name, &b.normalized_sku_name);
    let display_sim = ratio(&a.normalized_display_name, &b.normalized_display_name);

    let mut total = name_sim * SKU_NAME_WEIGHT + display_sim * DISPLAY_NAME_WEIGHT;
    if phonetic_equal(&a.phonetic_sku_name, &b.phonetic_sku_name) {
        total += PHONETIC_MATCH_BONUS;
    }
    if phonetic_equal(&a.phonetic_display_name, &b.phonetic_display_name) {
        total += PHONETIC_MATCH_BONUS;
    }

    total.min(PAIR_SCORE_CEILING)
}
