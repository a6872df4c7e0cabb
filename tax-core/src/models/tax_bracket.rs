use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::format_compact;

/// One marginal-rate band of a progressive schedule.
///
/// Bounds are closed-open (`[annual_min, annual_max)`). Only the top bracket
/// of a schedule leaves `annual_max` unset. The monthly bounds exist for
/// display; calculation always runs on the annual figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Display/ordering aid. Published tables may skip numbers.
    pub sequence_number: u32,
    /// Marginal rate as a percentage (`15` means 15%).
    pub rate: Decimal,
    pub annual_min: Decimal,
    pub annual_max: Option<Decimal>,
    pub monthly_min: Decimal,
    pub monthly_max: Option<Decimal>,
}

impl TaxBracket {
    /// Width of the annual band, or `None` for the unbounded top bracket.
    pub fn width(&self) -> Option<Decimal> {
        self.annual_max.map(|max| max - self.annual_min)
    }

    /// Returns `true` when `annual_income` falls inside `[annual_min, annual_max)`.
    pub fn contains(
        &self,
        annual_income: Decimal,
    ) -> bool {
        annual_income >= self.annual_min && self.annual_max.is_none_or(|max| annual_income < max)
    }

    /// Label for the annual band, e.g. `"First 800,000"` or `"Above 50,000,000"`.
    pub fn annual_band(&self) -> String {
        band_label(self.annual_min, self.annual_max)
    }

    /// Label for the monthly band, e.g. `"Next 183,333.33"`.
    pub fn monthly_band(&self) -> String {
        band_label(self.monthly_min, self.monthly_max)
    }
}

fn band_label(
    min: Decimal,
    max: Option<Decimal>,
) -> String {
    match max {
        None => format!("Above {}", format_compact(min)),
        Some(max) if min.is_zero() => format!("First {}", format_compact(max)),
        Some(max) => format!("Next {}", format_compact(max - min)),
    }
}
