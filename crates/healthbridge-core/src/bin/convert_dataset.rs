//! One-shot CSV to JSON dataset conversion.
//!
//! Reads the raw symptom-checker CSV export and writes the JSON document
//! the dataset loader consumes, printing a summary of what was converted.
//!
//! Usage:
//!   cargo run --bin convert-dataset -- --input dataset.csv --output symptom_dataset.json

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use healthbridge_core::dataset::convert_file;
use healthbridge_core::models::Severity;

/// Convert a symptom-checker CSV export into the loader's JSON format.
#[derive(Parser)]
#[command(name = "convert-dataset", about = "CSV to JSON dataset conversion")]
struct Cli {
    /// Source CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// Destination JSON file
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug to see per-row skip reasons.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let stats = convert_file(&cli.input, &cli.output)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    println!("Converted {} records ({} rows skipped)", stats.total_records, stats.skipped_rows);
    println!("Saved to: {}", cli.output.display());

    println!("\nDiseases:");
    for (disease, count) in &stats.disease_counts {
        println!("  {}: {} cases", disease, count);
    }

    println!("\nSeverity distribution:");
    for severity in Severity::ALL {
        println!(
            "  {}: {} cases",
            severity,
            stats.severity_distribution.count(severity)
        );
    }

    if let Some((min, max)) = stats.age_range {
        println!("\nAge range: {} - {} years", min, max);
    }
    if let Some((min, max)) = stats.confidence_range {
        println!("Confidence range: {}% - {}%", min, max);
    }

    Ok(())
}
