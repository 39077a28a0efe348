// src/matching/fuzzy.rs
// Exhaustive pairwise fuzzy-duplicate classification with dual thresholds.

use indicatif::ProgressBar;
use log::debug;

use crate::models::core::{AnnotatedSku, CandidatePair};
use crate::models::stats::FuzzyClassifyStats;
use crate::similarity::score_pair;
use crate::utils::config::DedupThresholds;

/// Scores every unordered pair of records, in input order (`i` ascending,
/// then `j` ascending), and applies the dual-threshold policy to the later
/// record of each pair:
///
/// - at or above the removal threshold the later record is linked to the
///   earlier one, unless an earlier pair already linked it (the first
///   qualifying match wins, even against a later, higher-scoring pair);
/// - in the review band the later record is flagged for manual review;
/// - every pair meeting at least the review threshold is emitted for the
///   duplicate-pairs report, whether or not a new link was made.
///
/// All pairs are always evaluated; a record being linked does not exempt it
/// from later comparisons, which may still flag other records.
///
/// O(n^2) comparisons by design; acceptable for the catalog sizes this
/// targets.
pub fn classify_fuzzy_duplicates(
    records: &mut [AnnotatedSku],
    thresholds: &DedupThresholds,
    progress: Option<&ProgressBar>,
) -> (Vec<CandidatePair>, FuzzyClassifyStats) {
    let mut pairs = Vec::new();
    let mut stats = FuzzyClassifyStats::default();

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let score = score_pair(&records[i].sku, &records[j].sku);
            stats.pairs_compared += 1;

            if score >= thresholds.removal_threshold {
                let canonical = records[i].sku.canonical_ref();
                if records[j].resolution.link_to(canonical) {
                    stats.pairs_linked += 1;
                } else {
                    debug!(
                        "Pair ({}, {}) scored {:.1} but {} is already linked",
                        records[i].sku.sku_id(),
                        records[j].sku.sku_id(),
                        score,
                        records[j].sku.sku_id()
                    );
                }
                pairs.push(candidate_pair(&records[i], &records[j], score));
            } else if score >= thresholds.review_threshold {
                records[j].resolution.flag_for_review();
                stats.pairs_flagged += 1;
                pairs.push(candidate_pair(&records[i], &records[j], score));
            }
        }
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    stats.pairs_reported = pairs.len();
    (pairs, stats)
}

fn candidate_pair(a: &AnnotatedSku, b: &AnnotatedSku, score: f64) -> CandidatePair {
    CandidatePair {
        sku_id_1: a.sku.sku_id().to_string(),
        sku_id_2: b.sku.sku_id().to_string(),
        score,
    }
}
