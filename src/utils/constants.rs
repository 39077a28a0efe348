// src/utils/constants.rs

/// Weight applied to the normalized SKU-name similarity ratio.
pub const SKU_NAME_WEIGHT: f64 = 0.25;

/// Weight applied to the normalized display-name similarity ratio.
pub const DISPLAY_NAME_WEIGHT: f64 = 0.25;

/// Flat bonus added when a pair's phonetic codes match, once for the SKU
/// name and once for the display name.
pub const PHONETIC_MATCH_BONUS: f64 = 15.0;

/// Upper clamp on the pair score. With the weights above the score cannot
/// actually exceed 80; the clamp exists so the scorer stays on a 100-point
/// scale if the weights are ever retuned.
pub const PAIR_SCORE_CEILING: f64 = 100.0;

/// Scores at or above this link the later record to the earlier one.
pub const DEFAULT_REMOVAL_THRESHOLD: f64 = 75.0;

/// Scores at or above this (but below the removal threshold) flag the later
/// record for manual review.
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 50.0;
