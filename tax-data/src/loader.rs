use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{ScheduleError, TaxBracket, TaxSchedule};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid bracket table: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket table CSV file.
///
/// - `sn`: Sequence number shown to users (may skip values)
/// - `rate`: Marginal rate as a percentage (e.g., 15 for 15%)
/// - `annual_min`: Lower bound of the annual band
/// - `annual_max`: Upper bound of the annual band (empty for the top band)
/// - `monthly_min`: Lower bound of the monthly band
/// - `monthly_max`: Upper bound of the monthly band (empty for the top band)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub sn: u32,
    pub rate: Decimal,
    pub annual_min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub annual_max: Option<Decimal>,
    pub monthly_min: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub monthly_max: Option<Decimal>,
}

impl From<BracketRecord> for TaxBracket {
    fn from(record: BracketRecord) -> Self {
        TaxBracket {
            sequence_number: record.sn,
            rate: record.rate,
            annual_min: record.annual_min,
            annual_max: record.annual_max,
            monthly_min: record.monthly_min,
            monthly_max: record.monthly_max,
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive bracket tables stored as CSV.
///
/// Swapping tax law means pointing the loader at a different file; the
/// calculator itself never changes.
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed bracket records");
        Ok(records)
    }

    /// Parse and validate a complete schedule named `name`.
    pub fn load<R: Read>(
        reader: R,
        name: &str,
    ) -> Result<TaxSchedule, BracketLoaderError> {
        let records = Self::parse(reader)?;
        let brackets = records.into_iter().map(TaxBracket::from).collect();
        Ok(TaxSchedule::new(name, brackets)?)
    }

    /// Read a schedule from disk. The file stem becomes the schedule name.
    pub fn load_file(path: &Path) -> Result<TaxSchedule, BracketLoaderError> {
        let file = File::open(path).map_err(|source| BracketLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let schedule = Self::load(file, &name)?;
        info!(
            path = %path.display(),
            brackets = schedule.brackets().len(),
            "loaded bracket table"
        );
        Ok(schedule)
    }
}
