// src/models/stats.rs

use chrono::NaiveDateTime;
use uuid::Uuid;

/// Counters from the exact-duplicate linking pass.
#[derive(Debug, Clone, Default)]
pub struct ExactLinkStats {
    pub records_total: usize,
    pub records_linked: usize,
    pub keys_registered: usize,
}

/// Counters from the pairwise fuzzy classification pass.
#[derive(Debug, Clone, Default)]
pub struct FuzzyClassifyStats {
    pub pairs_compared: usize,
    pub pairs_linked: usize,
    pub pairs_flagged: usize,
    pub pairs_reported: usize,
}

/// Run-level statistics, filled in as the pipeline progresses.
#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub run_id: String,
    pub run_timestamp: NaiveDateTime,
    pub total_records: usize,
    pub exact: ExactLinkStats,
    pub fuzzy: FuzzyClassifyStats,
    pub load_time: f64,
    pub dedup_time: f64,
    pub persist_time: f64,
    pub total_processing_time: f64,
}

impl PipelineStats {
    pub fn new_run() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            run_timestamp: chrono::Utc::now().naive_utc(),
            total_records: 0,
            exact: ExactLinkStats::default(),
            fuzzy: FuzzyClassifyStats::default(),
            load_time: 0.0,
            dedup_time: 0.0,
            persist_time: 0.0,
            total_processing_time: 0.0,
        }
    }
}
