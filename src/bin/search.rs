use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dedupe_lib::dataset::load_catalog;
use dedupe_lib::search::search_catalog;
use log::info;

/// Ranks catalog entries against a free-text query by partial-substring
/// similarity and prints the hits as JSON, best match first.
#[derive(Parser, Debug)]
#[command(name = "search")]
struct Cli {
    /// Catalog CSV to search
    #[arg(long, default_value = "data/sku_list.csv")]
    input: PathBuf,

    /// Keep only the top N hits
    #[arg(long)]
    limit: Option<usize>,

    /// Query string
    query: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let records = load_catalog(&cli.input).context("Failed to load catalog")?;
    info!(
        "Searching {} catalog records for {:?}",
        records.len(),
        cli.query
    );

    let mut hits = search_catalog(&cli.query, &records);
    if let Some(limit) = cli.limit {
        hits.truncate(limit);
    }

    let json = serde_json::to_string_pretty(&hits).context("Failed to serialize search hits")?;
    println!("{}", json);
    Ok(())
}
