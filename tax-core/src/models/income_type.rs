use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MONTHS_PER_YEAR: i64 = 12;

/// Whether a gross income figure is per year or per month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeType {
    #[default]
    Annual,
    Monthly,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown income type '{0}' (expected 'annual' or 'monthly')")]
pub struct ParseIncomeTypeError(pub String);

impl IncomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Monthly => "monthly",
        }
    }

    /// Scales `amount` to a yearly figure.
    pub fn annualize(
        &self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Annual => amount,
            Self::Monthly => amount * Decimal::from(MONTHS_PER_YEAR),
        }
    }
}

impl FromStr for IncomeType {
    type Err = ParseIncomeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "monthly" => Ok(Self::Monthly),
            _ => Err(ParseIncomeTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for IncomeType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
