//! CSV loader for batches of tax calculation inputs.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column           | Required | Type    | Notes                                   |
//! |------------------|----------|---------|-----------------------------------------|
//! | `income_type`    | yes      | string  | `annual` or `monthly`                   |
//! | `gross_income`   | yes      | decimal | e.g. `4000000`                          |
//! | `pension_rate`   | no       | decimal | Percent; empty or missing means `8`     |
//! | `nhf_rate`       | no       | decimal | Percent; empty or missing means `2.5`   |
//! | `nhis_rate`      | no       | decimal | Percent; empty or missing means `5`     |
//! | `life_assurance` | no       | decimal | Flat amount; empty or missing means `0` |
//! | `other_reliefs`  | no       | decimal | Flat amount; empty or missing means `0` |
//!
//! ### Minimal example
//!
//! ```csv
//! income_type,gross_income
//! monthly,250000
//! ```
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{IncomeType, TaxCalculationInput, TaxInputError};
use tracing::info;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    income_type: String,
    gross_income: Decimal,
    #[serde(default)]
    pension_rate: Option<Decimal>,
    #[serde(default)]
    nhf_rate: Option<Decimal>,
    #[serde(default)]
    nhis_rate: Option<Decimal>,
    #[serde(default)]
    life_assurance: Option<Decimal>,
    #[serde(default)]
    other_reliefs: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An `income_type` cell was neither `annual` nor `monthly`.
    /// `row` is 1-based (header = row 0).
    #[error("unrecognised income type '{value}' on row {row}")]
    InvalidIncomeType { value: String, row: usize },

    /// The row parsed but holds out-of-range values.
    #[error("row {row}: {source}")]
    InvalidInput {
        row: usize,
        #[source]
        source: TaxInputError,
    },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a validated input.
///
/// `row_number` is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
    defaults: &TaxCalculationInput,
) -> Result<TaxCalculationInput, CsvLoadError> {
    let income_type: IncomeType = row
        .income_type
        .parse()
        .map_err(|_| CsvLoadError::InvalidIncomeType {
            value: row.income_type.clone(),
            row: row_number,
        })?;

    let input = TaxCalculationInput {
        income_type,
        gross_income: row.gross_income,
        pension_rate: row.pension_rate.unwrap_or(defaults.pension_rate),
        nhf_rate: row.nhf_rate.unwrap_or(defaults.nhf_rate),
        nhis_rate: row.nhis_rate.unwrap_or(defaults.nhis_rate),
        life_assurance: row.life_assurance.unwrap_or(defaults.life_assurance),
        other_reliefs: row.other_reliefs.unwrap_or(defaults.other_reliefs),
    };

    input.validate().map_err(|source| CsvLoadError::InvalidInput {
        row: row_number,
        source,
    })?;
    Ok(input)
}

/// Parse CSV text and return the inputs in file order. Empty optional
/// cells take the standard relief defaults.
pub fn load_from_str(input: &str) -> Result<Vec<TaxCalculationInput>, CsvLoadError> {
    load_from_str_with(input, &TaxCalculationInput::default())
}

/// Like [load_from_str], but empty optional cells are filled from `defaults`.
/// The income type and gross income of `defaults` are ignored.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – structurally invalid CSV or a bad number.
/// * [CsvLoadError::InvalidIncomeType] – an unknown `income_type`.
/// * [CsvLoadError::InvalidInput] – negative income or an out-of-range rate.
pub fn load_from_str_with(
    input: &str,
    defaults: &TaxCalculationInput,
) -> Result<Vec<TaxCalculationInput>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1, defaults)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxCalculationInput>, CsvLoadError> {
    load_from_file_with(path, &TaxCalculationInput::default())
}

/// Read a file from disk and delegate to [load_from_str_with].
pub fn load_from_file_with(
    path: &Path,
    defaults: &TaxCalculationInput,
) -> Result<Vec<TaxCalculationInput>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let inputs = load_from_str_with(&contents, defaults)?;
    info!(path = %path.display(), rows = inputs.len(), "loaded income batch");
    Ok(inputs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
