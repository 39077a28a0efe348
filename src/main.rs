use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use dedupe_lib::dataset::{load_catalog, save_annotated_catalog, save_duplicate_report};
use dedupe_lib::matching::manager::run_dedup_pipeline;
use dedupe_lib::models::stats::PipelineStats;
use dedupe_lib::utils::config::DedupThresholds;
use dedupe_lib::utils::env::load_env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

/// SKU catalog deduplication pipeline: normalizes the catalog, links exact
/// duplicates, classifies fuzzy duplicates, and writes the annotated
/// catalog plus a duplicate-pairs report.
#[derive(Parser, Debug)]
#[command(name = "dedupe")]
struct Cli {
    /// Input catalog CSV (Sku_ID, Item_Code, Sku_Name, Display_Name)
    #[arg(long, default_value = "data/sku_list.csv")]
    input: PathBuf,

    /// Annotated output catalog CSV
    #[arg(long, default_value = "data/sku_list_with_ref_ids.csv")]
    output: PathBuf,

    /// Duplicate-pairs report CSV
    #[arg(long, default_value = "data/duplicate_pairs.csv")]
    report: PathBuf,

    /// Override the removal threshold (env: DEDUPE_REMOVAL_THRESHOLD)
    #[arg(long)]
    removal_threshold: Option<f64>,

    /// Override the review threshold (env: DEDUPE_REVIEW_THRESHOLD)
    #[arg(long)]
    review_threshold: Option<f64>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    load_env();
    let cli = Cli::parse();

    info!("Starting SKU catalog deduplication pipeline");

    let mut thresholds = DedupThresholds::from_env()?;
    if let Some(removal) = cli.removal_threshold {
        thresholds.removal_threshold = removal;
    }
    if let Some(review) = cli.review_threshold {
        thresholds.review_threshold = review;
    }
    thresholds.validate()?;
    thresholds.log_config();

    let mut stats = PipelineStats::new_run();
    info!("Run ID: {} ({})", stats.run_id, stats.run_timestamp);
    let run_start = Instant::now();

    // Phase 1: load the catalog
    let phase_start = Instant::now();
    let records = load_catalog(&cli.input).context("Failed to load input catalog")?;
    stats.total_records = records.len();
    stats.load_time = phase_start.elapsed().as_secs_f64();
    info!(
        "Loaded {} catalog records from {}",
        records.len(),
        cli.input.display()
    );

    // Phase 2: normalize, link exact duplicates, classify fuzzy duplicates
    let progress = if cli.no_progress {
        None
    } else {
        let pb = ProgressBar::new(records.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .context("Failed to set progress bar style")?
                .progress_chars("#>-"),
        );
        pb.set_message("Classifying fuzzy duplicates...");
        Some(pb)
    };

    let phase_start = Instant::now();
    let outcome = run_dedup_pipeline(records, &thresholds, progress.as_ref())?;
    stats.exact = outcome.exact_stats.clone();
    stats.fuzzy = outcome.fuzzy_stats.clone();
    stats.dedup_time = phase_start.elapsed().as_secs_f64();
    if let Some(pb) = &progress {
        pb.finish_with_message(format!(
            "{} pairs reported",
            outcome.duplicate_pairs.len()
        ));
    }

    // Phase 3: persist the annotated catalog and the report
    let phase_start = Instant::now();
    save_annotated_catalog(&cli.output, &outcome.records)
        .context("Failed to write annotated catalog")?;
    save_duplicate_report(&cli.report, &outcome.duplicate_pairs)
        .context("Failed to write duplicate-pairs report")?;
    stats.persist_time = phase_start.elapsed().as_secs_f64();

    for pair in &outcome.duplicate_pairs {
        info!(
            "Potential fuzzy duplicate found: Sku_ID {} and Sku_ID {} with score {:.1}",
            pair.sku_id_1, pair.sku_id_2, pair.score
        );
    }

    stats.total_processing_time = run_start.elapsed().as_secs_f64();

    info!("=== Pipeline Summary ===");
    info!("Run ID: {}", stats.run_id);
    info!("Total records: {}", stats.total_records);
    info!(
        "Exact links: {} ({} keys registered)",
        stats.exact.records_linked, stats.exact.keys_registered
    );
    info!(
        "Fuzzy pass: {} pairs compared, {} linked, {} flagged for review",
        stats.fuzzy.pairs_compared, stats.fuzzy.pairs_linked, stats.fuzzy.pairs_flagged
    );
    info!("Duplicate pairs reported: {}", stats.fuzzy.pairs_reported);
    info!("=== Timing Breakdown ===");
    info!("Load: {:.2}s", stats.load_time);
    info!("Dedup: {:.2}s", stats.dedup_time);
    info!("Persist: {:.2}s", stats.persist_time);
    info!("Total execution time: {:.2}s", stats.total_processing_time);
    info!(
        "Annotated catalog written to {} and report to {}",
        cli.output.display(),
        cli.report.display()
    );
    info!("Pipeline completed successfully!");
    Ok(())
}
