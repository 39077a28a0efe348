// src/matching/manager.rs
// Composes the dedup passes over an already-loaded catalog.

use std::time::Instant;

use anyhow::Result;
use indicatif::ProgressBar;
use log::{debug, info};

use crate::matching::exact::link_exact_duplicates;
use crate::matching::fuzzy::classify_fuzzy_duplicates;
use crate::models::core::{AnnotatedSku, CandidatePair, NormalizedSku, SkuRecord};
use crate::models::stats::{ExactLinkStats, FuzzyClassifyStats};
use crate::utils::config::DedupThresholds;

/// Everything the dedup pipeline produces for one run: the annotated
/// records (in input order) and the duplicate-pairs report, plus per-phase
/// counters.
#[derive(Debug, Clone)]
pub struct DedupOutcome {
    pub records: Vec<AnnotatedSku>,
    pub duplicate_pairs: Vec<CandidatePair>,
    pub exact_stats: ExactLinkStats,
    pub fuzzy_stats: FuzzyClassifyStats,
}

/// Runs normalization, exact linking, and fuzzy classification over the
/// records, in that order. The caller is responsible for loading the
/// records and persisting the outcome; keeping I/O out of here keeps the
/// core runnable against in-memory catalogs.
///
/// Threshold validation is a hard precondition: an invalid configuration
/// fails the run before any record is touched.
pub fn run_dedup_pipeline(
    records: Vec<SkuRecord>,
    thresholds: &DedupThresholds,
    progress: Option<&ProgressBar>,
) -> Result<DedupOutcome> {
    thresholds.validate()?;

    let total = records.len();
    info!("Deduplicating {} catalog records", total);

    let phase_start = Instant::now();
    let normalized: Vec<NormalizedSku> =
        records.into_iter().map(NormalizedSku::from_record).collect();
    debug!("Normalized {} records in {:.2?}", total, phase_start.elapsed());

    let phase_start = Instant::now();
    let (mut annotated, exact_stats) = link_exact_duplicates(normalized);
    info!(
        "Exact pass: {} of {} records linked ({} keys registered) in {:.2?}",
        exact_stats.records_linked,
        exact_stats.records_total,
        exact_stats.keys_registered,
        phase_start.elapsed()
    );

    let phase_start = Instant::now();
    let (duplicate_pairs, fuzzy_stats) =
        classify_fuzzy_duplicates(&mut annotated, thresholds, progress);
    info!(
        "Fuzzy pass: {} pairs compared, {} linked, {} flagged for review in {:.2?}",
        fuzzy_stats.pairs_compared,
        fuzzy_stats.pairs_linked,
        fuzzy_stats.pairs_flagged,
        phase_start.elapsed()
    );

    Ok(DedupOutcome {
        records: annotated,
        duplicate_pairs,
        exact_stats,
        fuzzy_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, code: &str, name: &str, display: &str) -> SkuRecord {
        SkuRecord {
            sku_id: id.to_string(),
            item_code: code.to_string(),
            sku_name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
            display_name: if display.is_empty() {
                None
            } else {
                Some(display.to_string())
            },
        }
    }

    #[test]
    fn test_case_only_variant_links_exactly() {
        // Identical up to case on the SKU name, identical elsewhere: the
        // exact pass links the later record to the first occurrence.
        let records = vec![
            record("A", "IC-1", "Red Widget", "ACME Widget"),
            record("B", "IC-1", "red widget", "ACME WIDGET"),
        ];
        let outcome = run_dedup_pipeline(records, &DedupThresholds::default(), None).unwrap();
        let linked = outcome.records[1].resolution.canonical().unwrap();
        assert_eq!(linked.sku_id, "A");
        assert!(outcome.records[0].resolution.canonical().is_none());
        assert_eq!(outcome.exact_stats.records_linked, 1);
    }

    #[test]
    fn test_near_miss_lands_in_review_band() {
        let records = vec![
            record("C", "IC-1", "Blue Gadget", "Blue Gadget 500"),
            record("D", "IC-2", "Blu Gadget", "Blu Gadget 700"),
        ];
        let outcome = run_dedup_pipeline(records, &DedupThresholds::default(), None).unwrap();
        assert!(outcome.records[1].resolution.canonical().is_none());
        assert!(outcome.records[1].resolution.needs_review());
        assert_eq!(outcome.duplicate_pairs.len(), 1);
        let score = outcome.duplicate_pairs[0].score;
        assert!((50.0..75.0).contains(&score), "score was {}", score);
    }

    #[test]
    fn test_single_qualifying_pair_in_report() {
        // A and B are near-duplicates; C resembles neither. Only the (A, B)
        // pair appears in the report, B is linked to A, and C is untouched.
        let records = vec![
            record("A", "IC-1", "Steel Hammer", "Hammer of Steel"),
            record("B", "IC-2", "Steel Hamer", "Hamer of Steel"),
            record("C", "IC-3", "Glass Vase", "Vase of Glass"),
        ];
        let outcome = run_dedup_pipeline(records, &DedupThresholds::default(), None).unwrap();
        assert_eq!(outcome.duplicate_pairs.len(), 1);
        assert_eq!(outcome.duplicate_pairs[0].sku_id_1, "A");
        assert_eq!(outcome.duplicate_pairs[0].sku_id_2, "B");
        assert!(outcome.duplicate_pairs[0].score >= 75.0);
        assert_eq!(
            outcome.records[1].resolution.canonical().unwrap().sku_id,
            "A"
        );
        assert!(outcome.records[2].resolution.canonical().is_none());
        assert!(!outcome.records[2].resolution.needs_review());
    }

    #[test]
    fn test_invalid_thresholds_rejected_before_processing() {
        let records = vec![
            record("A", "IC-1", "Red Widget", "ACME Widget"),
            record("B", "IC-2", "red widget", "ACME WIDGET"),
        ];
        let thresholds = DedupThresholds {
            removal_threshold: 75.0,
            review_threshold: 80.0,
        };
        assert!(run_dedup_pipeline(records, &thresholds, None).is_err());
    }

    #[test]
    fn test_exact_link_survives_fuzzy_pass() {
        // The exact pass links B to A; the fuzzy pair (A, B) also qualifies
        // and is reported, but the reference still points at A.
        let records = vec![
            record("A", "IC-1", "Red Widget", "ACME Widget"),
            record("B", "IC-2", "red widget", "acme widget"),
        ];
        let outcome = run_dedup_pipeline(records, &DedupThresholds::default(), None).unwrap();
        assert_eq!(outcome.duplicate_pairs.len(), 1);
        assert_eq!(
            outcome.records[1].resolution.canonical().unwrap().sku_id,
            "A"
        );
        assert_eq!(outcome.fuzzy_stats.pairs_linked, 0);
    }
}
