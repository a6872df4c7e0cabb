use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::format::{BracketTable, format_compact};
use tax_data::BracketTableLoader;

/// Validate a bracket table CSV file and print the resulting schedule.
///
/// The CSV file should have the following columns:
/// - sn: Sequence number shown to users
/// - rate: The marginal rate as a percentage (e.g., 15)
/// - annual_min: Lower bound of the annual band
/// - annual_max: Upper bound of the annual band (empty for the top band)
/// - monthly_min: Lower bound of the monthly band
/// - monthly_max: Upper bound of the monthly band (empty for the top band)
#[derive(Parser, Debug)]
#[command(name = "tax-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the bracket table
    #[arg(short, long)]
    file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking bracket table: {}", args.file.display());

    let schedule = BracketTableLoader::load_file(&args.file)
        .with_context(|| format!("Invalid bracket table: {}", args.file.display()))?;

    print!("{}", BracketTable { schedule: &schedule });

    println!(
        "Schedule '{}' is valid: {} brackets, top rate {}%.",
        schedule.name(),
        schedule.brackets().len(),
        format_compact(schedule.top_rate())
    );

    Ok(())
}
