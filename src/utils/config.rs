// src/utils/config.rs
// Threshold configuration for the fuzzy classification pass.

use anyhow::{ensure, Result};
use log::{info, warn};
use std::env;

use crate::utils::constants::{DEFAULT_REMOVAL_THRESHOLD, DEFAULT_REVIEW_THRESHOLD};

/// Decision thresholds for fuzzy classification. A pair scoring at or above
/// `removal_threshold` links the later record; a pair scoring at or above
/// `review_threshold` (but below removal) flags it for manual review.
#[derive(Debug, Clone)]
pub struct DedupThresholds {
    pub removal_threshold: f64,
    pub review_threshold: f64,
}

impl Default for DedupThresholds {
    fn default() -> Self {
        Self {
            removal_threshold: DEFAULT_REMOVAL_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

impl DedupThresholds {
    pub fn new(removal_threshold: f64, review_threshold: f64) -> Result<Self> {
        let thresholds = Self {
            removal_threshold,
            review_threshold,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Reads thresholds from `DEDUPE_REMOVAL_THRESHOLD` and
    /// `DEDUPE_REVIEW_THRESHOLD`, falling back to the defaults for unset or
    /// unparseable values.
    pub fn from_env() -> Result<Self> {
        let removal = read_env_threshold("DEDUPE_REMOVAL_THRESHOLD", DEFAULT_REMOVAL_THRESHOLD);
        let review = read_env_threshold("DEDUPE_REVIEW_THRESHOLD", DEFAULT_REVIEW_THRESHOLD);
        Self::new(removal, review)
    }

    /// The review threshold must sit strictly below the removal threshold;
    /// otherwise pairs in the review band would be silently misclassified.
    /// Checked before any record is processed.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.review_threshold < self.removal_threshold,
            "invalid thresholds: review threshold ({}) must be strictly below removal threshold ({})",
            self.review_threshold,
            self.removal_threshold
        );
        Ok(())
    }

    pub fn log_config(&self) {
        info!(
            "Dedup thresholds: removal >= {}, review >= {}",
            self.removal_threshold, self.review_threshold
        );
    }
}

fn read_env_threshold(var: &str, default: f64) -> f64 {
    match env::var(var) {
        Err(_) => default,
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(
                "Could not parse {}={:?} as a number, using default {}",
                var, raw, default
            );
            default
        }),
    }
}
