// src/matching/exact.rs
// Single-pass exact-duplicate linking over normalized records.

use std::collections::HashMap;

use log::debug;

use crate::models::core::{AnnotatedSku, CanonicalRef, NormalizedSku};
use crate::models::stats::ExactLinkStats;

/// Links records that are identical under normalization or share an item
/// code. Walks the records in input order keeping one map from key to the
/// first record seen with that key; all three key kinds (normalized SKU
/// name, normalized display name, raw item code) share the map's namespace.
///
/// Per record, the keys are checked in priority order: SKU name first, then
/// display name, then item code. The first hit links the record to that
/// key's canonical holder and stops the search. A record with no hit becomes
/// the canonical holder for all three of its keys. The first occurrence of a
/// key is never linked, and linking does not propagate transitively across
/// keys it was not looked up under.
pub fn link_exact_duplicates(records: Vec<NormalizedSku>) -> (Vec<AnnotatedSku>, ExactLinkStats) {
    let mut canonical_by_key: HashMap<String, CanonicalRef> = HashMap::new();
    let mut stats = ExactLinkStats {
        records_total: records.len(),
        ..Default::default()
    };

    let mut annotated = Vec::with_capacity(records.len());
    for sku in records {
        let hit = canonical_by_key
            .get(&sku.normalized_sku_name)
            .or_else(|| canonical_by_key.get(&sku.normalized_display_name))
            .or_else(|| canonical_by_key.get(sku.item_code()))
            .cloned();

        let mut record = AnnotatedSku::new(sku);
        match hit {
            Some(canonical) => {
                debug!(
                    "Exact duplicate: {} -> canonical {}",
                    record.sku.sku_id(),
                    canonical.sku_id
                );
                record.resolution.link_to(canonical);
                stats.records_linked += 1;
            }
            None => {
                let canonical = record.sku.canonical_ref();
                let keys = [
                    record.sku.normalized_sku_name.clone(),
                    record.sku.normalized_display_name.clone(),
                    record.sku.item_code().to_string(),
                ];
                for key in keys {
                    if canonical_by_key.insert(key, canonical.clone()).is_none() {
                        stats.keys_registered += 1;
                    }
                }
            }
        }
        annotated.push(record);
    }

    (annotated, stats)
}
