//! Validated progressive bracket tables.
//!
//! A [`TaxSchedule`] owns an ordered list of [`TaxBracket`]s that is
//! guaranteed to start at zero, be contiguous, and end in a single unbounded
//! bracket. Changing tax law means building a new schedule; the calculator
//! never edits one.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::TaxBracket;

/// Reasons a bracket table cannot be used as a progressive schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("tax schedule has no brackets")]
    Empty,

    #[error("first bracket must start at 0, starts at {0}")]
    FirstBracketNotAtZero(Decimal),

    #[error("bracket {sequence_number} starts at {found}, expected {expected}")]
    NotContiguous {
        sequence_number: u32,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {sequence_number} has an upper bound not above its lower bound")]
    EmptyRange { sequence_number: u32 },

    #[error("bracket {sequence_number} is unbounded but is not the top bracket")]
    UnboundedBeforeTop { sequence_number: u32 },

    #[error("top bracket {sequence_number} must be unbounded")]
    BoundedTop { sequence_number: u32 },

    #[error("bracket {sequence_number} has rate {rate}, expected 0 to 100")]
    InvalidRate { sequence_number: u32, rate: Decimal },
}

/// An immutable, validated progressive tax table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSchedule {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl TaxSchedule {
    /// Builds a schedule, ordering brackets by `annual_min` and checking
    /// that they tile `[0, ∞)` without gaps or overlaps.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] describing the first violated rule.
    pub fn new(
        name: impl Into<String>,
        mut brackets: Vec<TaxBracket>,
    ) -> Result<Self, ScheduleError> {
        brackets.sort_by(|a, b| a.annual_min.cmp(&b.annual_min));
        validate(&brackets)?;
        Ok(Self {
            name: name.into(),
            brackets,
        })
    }

    /// Nigerian PAYE bands for 2024.
    pub fn nigeria_2024() -> Self {
        let band = |sequence_number: u32,
                    rate: i64,
                    annual_min: i64,
                    annual_max: Option<i64>,
                    monthly_min: Decimal,
                    monthly_max: Option<Decimal>| TaxBracket {
            sequence_number,
            rate: Decimal::from(rate),
            annual_min: Decimal::from(annual_min),
            annual_max: annual_max.map(Decimal::from),
            monthly_min,
            monthly_max,
        };
        let cents = |value: i64| Decimal::new(value, 2);

        Self {
            name: "Nigeria PAYE 2024".to_string(),
            brackets: vec![
                band(1, 0, 0, Some(800_000), Decimal::ZERO, Some(cents(6_666_667))),
                band(
                    2,
                    15,
                    800_000,
                    Some(3_000_000),
                    cents(6_666_667),
                    Some(cents(25_000_000)),
                ),
                band(
                    3,
                    18,
                    3_000_000,
                    Some(12_000_000),
                    cents(25_000_000),
                    Some(cents(100_000_000)),
                ),
                band(
                    4,
                    21,
                    12_000_000,
                    Some(25_000_000),
                    cents(100_000_000),
                    Some(cents(208_333_333)),
                ),
                band(
                    5,
                    23,
                    25_000_000,
                    Some(50_000_000),
                    cents(208_333_333),
                    Some(cents(416_666_667)),
                ),
                band(7, 25, 50_000_000, None, cents(416_666_667), None),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Brackets in ascending order of `annual_min`.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Rate of the unbounded top bracket.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// The bracket containing `annual_income`, or `None` for negative amounts.
    pub fn bracket_for(
        &self,
        annual_income: Decimal,
    ) -> Option<&TaxBracket> {
        self.brackets.iter().find(|b| b.contains(annual_income))
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self::nigeria_2024()
    }
}

fn validate(brackets: &[TaxBracket]) -> Result<(), ScheduleError> {
    let first = brackets.first().ok_or(ScheduleError::Empty)?;
    if !first.annual_min.is_zero() {
        return Err(ScheduleError::FirstBracketNotAtZero(first.annual_min));
    }

    let last_index = brackets.len() - 1;
    let mut expected_min = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        let sequence_number = bracket.sequence_number;

        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE_HUNDRED {
            return Err(ScheduleError::InvalidRate {
                sequence_number,
                rate: bracket.rate,
            });
        }
        if bracket.annual_min != expected_min {
            return Err(ScheduleError::NotContiguous {
                sequence_number,
                expected: expected_min,
                found: bracket.annual_min,
            });
        }

        match bracket.annual_max {
            Some(_) if index == last_index => {
                return Err(ScheduleError::BoundedTop { sequence_number });
            }
            Some(max) if max <= bracket.annual_min => {
                return Err(ScheduleError::EmptyRange { sequence_number });
            }
            Some(max) => expected_min = max,
            None if index != last_index => {
                return Err(ScheduleError::UnboundedBeforeTop { sequence_number });
            }
            None => {}
        }
    }

    Ok(())
}
