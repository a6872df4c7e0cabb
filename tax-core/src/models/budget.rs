use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ExpenseCategory;

/// Errors raised when a budget or budget period is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budgets must be at least 1.
    #[error("budget amount must be at least 1, got {0}")]
    InvalidAmount(Decimal),

    /// Alert thresholds are percentages between 1 and 100.
    #[error("alert threshold must be between 1 and 100, got {0}")]
    InvalidThreshold(Decimal),

    /// Periods are written `YYYY-MM`.
    #[error("invalid budget period '{0}' (expected YYYY-MM)")]
    InvalidPeriod(String),
}

/// A calendar month that budgets and spending are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BudgetPeriod {
    year: i32,
    month: u32,
}

impl BudgetPeriod {
    /// Creates a period; `month` is 1-based.
    pub fn new(
        year: i32,
        month: u32,
    ) -> Result<Self, BudgetError> {
        if !(1..=12).contains(&month) {
            return Err(BudgetError::InvalidPeriod(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        Self::from_date(date) == *self
    }

    fn chrono_month(&self) -> Month {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .unwrap_or(Month::January)
    }

    /// Full month name, e.g. `"March"`.
    pub fn month_name(&self) -> &'static str {
        self.chrono_month().name()
    }

    /// Three-letter month label used on charts, e.g. `"Mar"`.
    pub fn short_label(&self) -> &'static str {
        &self.month_name()[..3]
    }
}

impl FromStr for BudgetPeriod {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| BudgetError::InvalidPeriod(s.to_string()))
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Spending limit for one category in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub alert_enabled: bool,
    /// Percentage of the budget at which a near-limit alert fires.
    pub alert_threshold: Decimal,
}

impl Budget {
    /// Default alert threshold for new budgets.
    pub const DEFAULT_ALERT_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

    pub fn new(
        category: ExpenseCategory,
        amount: Decimal,
        period: BudgetPeriod,
    ) -> Result<Self, BudgetError> {
        let budget = Self {
            category,
            amount,
            period,
            alert_enabled: true,
            alert_threshold: Self::DEFAULT_ALERT_THRESHOLD,
        };
        budget.validate()?;
        Ok(budget)
    }

    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.amount < Decimal::ONE {
            return Err(BudgetError::InvalidAmount(self.amount));
        }
        if self.alert_threshold < Decimal::ONE || self.alert_threshold > Decimal::ONE_HUNDRED {
            return Err(BudgetError::InvalidThreshold(self.alert_threshold));
        }
        Ok(())
    }
}
