//! Advisory Classification CLI
//!
//! Reads the summary rows produced by triage-extract, runs the remediation
//! decision table over them, and writes the classification listing plus the
//! exception and remediation stub files.

use std::fs;
use std::path::PathBuf;

use advisory_triage::{emit, ingest, Classification, Classifier, TriageConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "triage-classify")]
#[command(about = "Classify triaged advisories into remediation buckets")]
struct Cli {
    /// Path to the summary-row JSON artifact (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the triage artifacts are written to (overrides config)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,

    /// Classify and print the bucket summary without writing artifacts
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> advisory_triage::Result<()> {
    let mut config = TriageConfig::load_from(cli.config.as_deref())?;
    if let Some(out_dir) = cli.out_dir {
        config.paths.out_dir = out_dir;
    }
    let input = cli.input.unwrap_or_else(|| config.summary_json_path());

    println!("📥 Reading {}", input.display());
    let rows = ingest::read_summary(&input)?;
    println!("   Loaded {} summary rows", rows.len());

    let classifier = Classifier::new(&config.policy);
    let classified = classifier.classify_all(&rows);

    println!();
    println!("📊 Classification summary:");
    for bucket in [
        Classification::UpstreamRequired,
        Classification::FixLocally,
        Classification::AcceptException,
    ] {
        let count = classified
            .iter()
            .filter(|c| c.classification == bucket)
            .count();
        println!("  {}: {}", bucket, count);
    }

    if cli.dry_run {
        println!();
        println!("🔍 Dry run - not writing artifacts");
        return Ok(());
    }

    fs::create_dir_all(&config.paths.out_dir)?;

    let classification = config.classification_path();
    let exceptions = config.exceptions_path();
    let remediation = config.remediation_path();

    emit::write_classification(&classification, &classified)?;
    emit::write_exception_stubs(&exceptions, &classified, config.policy.expiry_year)?;
    emit::write_remediation_stubs(&remediation, &classified)?;

    println!();
    println!(
        "✅ Wrote classification to {}, deny suggestions to {}, updates list to {}",
        classification.display(),
        exceptions.display(),
        remediation.display()
    );
    Ok(())
}
