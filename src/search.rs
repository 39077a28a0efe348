// src/search.rs
// Free-text catalog search: ranks every SKU name against a query string.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::core::SkuRecord;
use crate::similarity::partial_ratio;

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub sku: String,
    #[serde(rename = "match")]
    pub match_score: f64,
}

/// Scores every catalog entry against the query by partial-substring
/// similarity of the lowercased strings and returns the hits sorted by
/// score, best first. A blank query returns no hits; records without a SKU
/// name score zero.
pub fn search_catalog(query: &str, records: &[SkuRecord]) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let query = query.to_lowercase();

    let mut hits: Vec<SearchHit> = records
        .iter()
        .map(|record| {
            let name = record.sku_name.as_deref().unwrap_or("");
            let match_score = if name.is_empty() {
                0.0
            } else {
                partial_ratio(&query, &name.to_lowercase())
            };
            SearchHit {
                sku: name.to_string(),
                match_score,
            }
        })
        .collect();

    hits.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: Option<&str>) -> SkuRecord {
        SkuRecord {
            sku_id: id.to_string(),
            item_code: format!("IC-{}", id),
            sku_name: name.map(|n| n.to_string()),
            display_name: None,
        }
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let records = vec![record("S1", Some("Red Widget"))];
        assert!(search_catalog("", &records).is_empty());
        assert!(search_catalog("   ", &records).is_empty());
    }

    #[test]
    fn test_exact_substring_scores_full_marks() {
        let records = vec![record("S1", Some("ACME Red Widget Deluxe"))];
        let hits = search_catalog("red widget", &records);
        assert_eq!(hits[0].match_score, 100.0);
        assert_eq!(hits[0].sku, "ACME Red Widget Deluxe");
    }

    #[test]
    fn test_hits_sorted_by_score_descending() {
        let records = vec![
            record("S1", Some("Zzz Flurble")),
            record("S2", Some("Red Widget")),
            record("S3", Some("Red Widgit")),
        ];
        let hits = search_catalog("red widget", &records);
        assert_eq!(hits[0].sku, "Red Widget");
        assert_eq!(hits[1].sku, "Red Widgit");
        assert!(hits[0].match_score >= hits[1].match_score);
        assert!(hits[1].match_score >= hits[2].match_score);
    }

    #[test]
    fn test_missing_names_score_zero_but_are_listed() {
        let records = vec![record("S1", None), record("S2", Some("Red Widget"))];
        let hits = search_catalog("red", &records);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].sku, "Red Widget");
        assert_eq!(hits[1].match_score, 0.0);
    }
}
