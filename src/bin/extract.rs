//! Advisory Extraction CLI
//!
//! Reads a cargo-deny NDJSON advisory report and flattens each diagnostic
//! into a summary row with its ancestor chain.

use std::fs;
use std::path::PathBuf;

use advisory_triage::{emit, extract, ingest, TriageConfig, WalkDiagnostics};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "triage-extract")]
#[command(about = "Flatten cargo-deny diagnostics into summary rows")]
struct Cli {
    /// Path to the cargo-deny NDJSON report (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the triage artifacts are written to (overrides config)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,
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
    if let Some(input) = cli.input {
        config.paths.input = input;
    }
    if let Some(out_dir) = cli.out_dir {
        config.paths.out_dir = out_dir;
    }

    println!("📥 Reading {}", config.paths.input.display());
    let records = ingest::read_ndjson(&config.paths.input)?;
    println!("   Parsed {} diagnostic objects", records.len());

    let mut diagnostics = WalkDiagnostics::new();
    let rows = extract::summarize_all(&records, &mut diagnostics);

    if !diagnostics.is_empty() {
        println!("⚠️  Dropped {} graph branch(es) during the walk:", diagnostics.len());
        for issue in &diagnostics {
            println!("   {}", issue);
        }
    }

    fs::create_dir_all(&config.paths.out_dir)?;

    let summary_json = config.summary_json_path();
    let summary_table = config.summary_table_path();
    emit::write_summary_json(&summary_json, &rows)?;
    emit::write_summary_table(&summary_table, &rows)?;

    println!(
        "✅ Wrote {} and {}",
        summary_json.display(),
        summary_table.display()
    );
    Ok(())
}
