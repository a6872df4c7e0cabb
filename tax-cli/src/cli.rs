use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tax_core::format::BracketTable;
use tax_core::{ProgressiveTaxCalculator, TaxForm, TaxSchedule};
use tax_data::{BracketTableLoader, load_from_file_with};
use tracing::{debug, info};

use crate::config::{AppConfig, ReliefDefaults};
use crate::report::{BatchReport, ResultReport};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian PAYE income-tax calculator.
///
/// Applies pension, NHF and NHIS reliefs, then walks the progressive bracket
/// table and prints the tax owed per bracket.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
pub struct Cli {
    /// Bracket table CSV to use instead of the built-in 2024 schedule.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Config file. Defaults to `paye.toml` when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (e.g. `debug`, `info,tax_core=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Do not print log output to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate tax for one income.
    Calculate(CalculateArgs),

    /// Print the active bracket table.
    Brackets,

    /// Calculate tax for every row of an income CSV.
    Batch {
        /// CSV with `income_type,gross_income` and optional relief columns.
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Amounts are taken as text so `1,200,000` works on the command line.
#[derive(Debug, Args)]
pub struct CalculateArgs {
    /// Gross income.
    #[arg(long)]
    pub income: String,

    /// Treat `--income` as a monthly figure.
    #[arg(long, default_value_t = false)]
    pub monthly: bool,

    /// Pension contribution rate in percent.
    #[arg(long)]
    pub pension: Option<String>,

    /// National Housing Fund rate in percent.
    #[arg(long)]
    pub nhf: Option<String>,

    /// National Health Insurance Scheme rate in percent.
    #[arg(long)]
    pub nhis: Option<String>,

    /// Life assurance premium (flat amount).
    #[arg(long)]
    pub life_assurance: Option<String>,

    /// Any other relief (flat amount).
    #[arg(long)]
    pub other_reliefs: Option<String>,
}

impl CalculateArgs {
    /// Fills a form from the flags, taking anything left out from `defaults`.
    pub fn to_form(
        &self,
        defaults: &ReliefDefaults,
    ) -> TaxForm {
        let or_default = |flag: &Option<String>, fallback: Decimal| {
            flag.clone().unwrap_or_else(|| fallback.to_string())
        };

        TaxForm {
            income_type: if self.monthly { "monthly" } else { "annual" }.to_string(),
            gross_income: self.income.clone(),
            pension: or_default(&self.pension, defaults.pension_rate),
            nhf: or_default(&self.nhf, defaults.nhf_rate),
            nhis: or_default(&self.nhis, defaults.nhis_rate),
            life_assurance: or_default(&self.life_assurance, defaults.life_assurance),
            other_reliefs: or_default(&self.other_reliefs, defaults.other_reliefs),
        }
    }
}

// ─── command dispatch ────────────────────────────────────────────────────────

/// Picks the bracket table: `--brackets`, then the config file, then the
/// built-in schedule.
pub fn resolve_schedule(
    cli: &Cli,
    config: &AppConfig,
) -> Result<TaxSchedule> {
    match cli.brackets.as_deref().or(config.brackets_file.as_deref()) {
        Some(path) => BracketTableLoader::load_file(path)
            .with_context(|| format!("Failed to load bracket table: {}", path.display())),
        None => {
            debug!("using built-in bracket table");
            Ok(TaxSchedule::nigeria_2024())
        }
    }
}

/// Runs the selected command and returns the text to print.
pub fn run(
    cli: &Cli,
    config: &AppConfig,
) -> Result<String> {
    let schedule = resolve_schedule(cli, config)?;
    let calculator = ProgressiveTaxCalculator::new(&schedule);
    let currency = config.currency_symbol.as_str();

    match &cli.command {
        Command::Calculate(args) => {
            let input = args.to_form(&config.reliefs).parse().map_err(|errors| {
                let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
                anyhow::anyhow!("Invalid input: {}", details.join("; "))
            })?;
            let result = calculator.calculate(&input);
            Ok(ResultReport {
                input: &input,
                result: &result,
                currency,
            }
            .to_string())
        }
        Command::Brackets => Ok(BracketTable {
            schedule: &schedule,
        }
        .to_string()),
        Command::Batch { file } => run_batch(&calculator, file, config),
    }
}

fn run_batch(
    calculator: &ProgressiveTaxCalculator<'_>,
    file: &Path,
    config: &AppConfig,
) -> Result<String> {
    let inputs = load_from_file_with(file, &config.reliefs.template())
        .with_context(|| format!("Failed to load incomes: {}", file.display()))?;

    let rows: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let result = calculator.calculate(&input);
            (input, result)
        })
        .collect();
    info!(rows = rows.len(), "batch complete");

    Ok(BatchReport {
        rows: &rows,
        currency: &config.currency_symbol,
    }
    .to_string())
}
