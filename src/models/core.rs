// src/models/core.rs
// Core catalog record types and the per-record resolution state threaded
// through the linking passes.

use serde::{Deserialize, Serialize};

use crate::normalize::{normalize_text, phonetic_encode};

/// One raw catalog row as loaded from the dataset. The identifier columns are
/// opaque and always present; the two name columns are free text and may be
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuRecord {
    #[serde(rename = "Sku_ID")]
    pub sku_id: String,
    #[serde(rename = "Item_Code")]
    pub item_code: String,
    #[serde(rename = "Sku_Name")]
    pub sku_name: Option<String>,
    #[serde(rename = "Display_Name")]
    pub display_name: Option<String>,
}

/// A catalog record with its derived comparison fields. Computed once, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSku {
    pub record: SkuRecord,
    pub normalized_sku_name: String,
    pub normalized_display_name: String,
    pub phonetic_sku_name: String,
    pub phonetic_display_name: String,
}

impl NormalizedSku {
    pub fn from_record(record: SkuRecord) -> Self {
        let normalized_sku_name = normalize_text(record.sku_name.as_deref());
        let normalized_display_name = normalize_text(record.display_name.as_deref());
        let phonetic_sku_name = phonetic_encode(record.sku_name.as_deref());
        let phonetic_display_name = phonetic_encode(record.display_name.as_deref());
        Self {
            record,
            normalized_sku_name,
            normalized_display_name,
            phonetic_sku_name,
            phonetic_display_name,
        }
    }

    pub fn sku_id(&self) -> &str {
        &self.record.sku_id
    }

    pub fn item_code(&self) -> &str {
        &self.record.item_code
    }

    /// Identifiers other records use to point at this record as canonical.
    pub fn canonical_ref(&self) -> CanonicalRef {
        CanonicalRef {
            sku_id: self.record.sku_id.clone(),
            item_code: self.record.item_code.clone(),
        }
    }
}

/// Reference to the canonical (first-seen) record for a duplicate. Carrying
/// both identifiers in one value keeps them set or absent together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRef {
    pub sku_id: String,
    pub item_code: String,
}

/// Mutable resolution state for a record. The setters enforce the write
/// rules: the canonical reference is assigned at most once, and the review
/// flag only ever goes from false to true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolutionState {
    canonical: Option<CanonicalRef>,
    manual_review: bool,
}

impl ResolutionState {
    /// Links this record to a canonical record. Returns false (and leaves the
    /// existing reference untouched) if a reference was already assigned.
    pub fn link_to(&mut self, target: CanonicalRef) -> bool {
        if self.canonical.is_some() {
            return false;
        }
        self.canonical = Some(target);
        true
    }

    pub fn flag_for_review(&mut self) {
        self.manual_review = true;
    }

    pub fn canonical(&self) -> Option<&CanonicalRef> {
        self.canonical.as_ref()
    }

    pub fn is_linked(&self) -> bool {
        self.canonical.is_some()
    }

    pub fn needs_review(&self) -> bool {
        self.manual_review
    }
}

/// A normalized record plus its resolution state; one row of the annotated
/// output dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSku {
    pub sku: NormalizedSku,
    pub resolution: ResolutionState,
}

impl AnnotatedSku {
    pub fn new(sku: NormalizedSku) -> Self {
        Self {
            sku,
            resolution: ResolutionState::default(),
        }
    }
}

/// A pair of records whose similarity score met at least the review
/// threshold. Only lives in the duplicate-pairs report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidatePair {
    #[serde(rename = "Sku_ID_1")]
    pub sku_id_1: String,
    #[serde(rename = "Sku_ID_2")]
    pub sku_id_2: String,
    #[serde(rename = "Score")]
    pub score: f64,
}
