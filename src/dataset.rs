// src/dataset.rs
// CSV load/save for the catalog and the duplicate-pairs report.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::core::{AnnotatedSku, CandidatePair, SkuRecord};

/// Reads catalog rows from CSV. Expects a header with `Sku_ID`, `Item_Code`,
/// `Sku_Name`, `Display_Name`; empty name fields come back as `None`. Any
/// malformed row fails the whole load so the passes never run over a
/// partially read catalog.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<SkuRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize().enumerate() {
        let record: SkuRecord =
            row.with_context(|| format!("Failed to parse catalog row {}", idx + 1))?;
        records.push(record);
    }
    Ok(records)
}

pub fn load_catalog(path: &Path) -> Result<Vec<SkuRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalog file {}", path.display()))?;
    read_catalog(file)
}

/// One row of the annotated output dataset: the input columns, the derived
/// comparison columns, and the resolution columns. Reference identifiers
/// serialize as empty cells when the record is canonical.
#[derive(Debug, Serialize)]
struct AnnotatedRow<'a> {
    #[serde(rename = "Sku_ID")]
    sku_id: &'a str,
    #[serde(rename = "Item_Code")]
    item_code: &'a str,
    #[serde(rename = "Sku_Name")]
    sku_name: Option<&'a str>,
    #[serde(rename = "Display_Name")]
    display_name: Option<&'a str>,
    #[serde(rename = "Normalized_Sku_Name")]
    normalized_sku_name: &'a str,
    #[serde(rename = "Normalized_Display_Name")]
    normalized_display_name: &'a str,
    #[serde(rename = "Phonetic_Sku_Name")]
    phonetic_sku_name: &'a str,
    #[serde(rename = "Phonetic_Display_Name")]
    phonetic_display_name: &'a str,
    #[serde(rename = "ref_skuID")]
    ref_sku_id: Option<&'a str>,
    #[serde(rename = "ref_ItemID")]
    ref_item_id: Option<&'a str>,
    #[serde(rename = "manual_review")]
    manual_review: bool,
}

impl<'a> AnnotatedRow<'a> {
    fn from_annotated(record: &'a AnnotatedSku) -> Self {
        let canonical = record.resolution.canonical();
        Self {
            sku_id: record.sku.sku_id(),
            item_code: record.sku.item_code(),
            sku_name: record.sku.record.sku_name.as_deref(),
            display_name: record.sku.record.display_name.as_deref(),
            normalized_sku_name: &record.sku.normalized_sku_name,
            normalized_display_name: &record.sku.normalized_display_name,
            phonetic_sku_name: &record.sku.phonetic_sku_name,
            phonetic_display_name: &record.sku.phonetic_display_name,
            ref_sku_id: canonical.map(|c| c.sku_id.as_str()),
            ref_item_id: canonical.map(|c| c.item_code.as_str()),
            manual_review: record.resolution.needs_review(),
        }
    }
}

pub fn write_annotated_catalog<W: Write>(writer: W, records: &[AnnotatedSku]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(AnnotatedRow::from_annotated(record))
            .with_context(|| format!("Failed to write annotated row for {}", record.sku.sku_id()))?;
    }
    csv_writer.flush().context("Failed to flush annotated catalog")?;
    Ok(())
}

pub fn save_annotated_catalog(path: &Path, records: &[AnnotatedSku]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_annotated_catalog(file, records)
}

pub fn write_duplicate_report<W: Write>(writer: W, pairs: &[CandidatePair]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for pair in pairs {
        csv_writer
            .serialize(pair)
            .with_context(|| format!("Failed to write report row ({}, {})", pair.sku_id_1, pair.sku_id_2))?;
    }
    csv_writer.flush().context("Failed to flush duplicate report")?;
    Ok(())
}

pub fn save_duplicate_report(path: &Path, pairs: &[CandidatePair]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    write_duplicate_report(file, pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::core::{CanonicalRef, NormalizedSku};

    const CATALOG_CSV: &str = "\
Sku_ID,Item_Code,Sku_Name,Display_Name
S1,I1,Red Widget,ACME Red Widget
S2,I2,,ACME Blue Gadget
S3,I3,Green Sprocket,
";

    #[test]
    fn test_read_catalog_with_missing_names() {
        let records = read_catalog(CATALOG_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sku_name.as_deref(), Some("Red Widget"));
        assert_eq!(records[1].sku_name, None);
        assert_eq!(records[2].display_name, None);
        assert_eq!(records[2].item_code, "I3");
    }

    #[test]
    fn test_read_catalog_rejects_malformed_rows() {
        let bad = "Sku_ID,Item_Code,Sku_Name,Display_Name\nS1,I1,Red Widget\n";
        assert!(read_catalog(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_write_annotated_catalog() {
        let mut linked = AnnotatedSku::new(NormalizedSku::from_record(SkuRecord {
            sku_id: "S2".to_string(),
            item_code: "I2".to_string(),
            sku_name: Some("red widget".to_string()),
            display_name: None,
        }));
        linked.resolution.link_to(CanonicalRef {
            sku_id: "S1".to_string(),
            item_code: "I1".to_string(),
        });
        linked.resolution.flag_for_review();
        let canonical = AnnotatedSku::new(NormalizedSku::from_record(SkuRecord {
            sku_id: "S1".to_string(),
            item_code: "I1".to_string(),
            sku_name: Some("Red Widget".to_string()),
            display_name: Some("ACME Red Widget".to_string()),
        }));

        let mut out = Vec::new();
        write_annotated_catalog(&mut out, &[canonical, linked]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Sku_ID,Item_Code,Sku_Name,Display_Name,Normalized_Sku_Name,\
Normalized_Display_Name,Phonetic_Sku_Name,Phonetic_Display_Name,\
ref_skuID,ref_ItemID,manual_review"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("S1,I1,Red Widget,ACME Red Widget,redwidget,acmeredwidget"));
        assert!(first.ends_with(",,false"));
        let second = lines.next().unwrap();
        assert!(second.contains(",S1,I1,true"));
    }

    #[test]
    fn test_write_duplicate_report() {
        let pairs = vec![
            CandidatePair {
                sku_id_1: "S1".to_string(),
                sku_id_2: "S2".to_string(),
                score: 80.0,
            },
            CandidatePair {
                sku_id_1: "S1".to_string(),
                sku_id_2: "S3".to_string(),
                score: 62.5,
            },
        ];
        let mut out = Vec::new();
        write_duplicate_report(&mut out, &pairs).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Sku_ID_1,Sku_ID_2,Score");
        assert_eq!(lines[1], "S1,S2,80.0");
        assert_eq!(lines[2], "S1,S3,62.5");
    }
}
