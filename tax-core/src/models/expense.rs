use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Shopping,
    Health,
    Other,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown expense category '{0}'")]
pub struct ParseCategoryError(pub String);

impl ExpenseCategory {
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Food,
            Self::Transport,
            Self::Entertainment,
            Self::Utilities,
            Self::Shopping,
            Self::Health,
            Self::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }

    /// Chart colour as a hex code.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#8B5CF6",
            Self::Transport => "#3B82F6",
            Self::Entertainment => "#EC4899",
            Self::Utilities => "#10B981",
            Self::Shopping | Self::Health => "#F59E0B",
            Self::Other => "#6B7280",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub title: String,
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
}
