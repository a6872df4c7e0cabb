//! Expense statistics and chart data.
//!
//! Everything here is a pure aggregation over a slice of [`Expense`]s. Any
//! function that depends on "now" takes `today` as an argument.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::{round_whole, share_percent};
use crate::{BudgetPeriod, Expense, ExpenseCategory};

/// Number of months shown on the monthly spending chart.
pub const MONTHLY_WINDOW: usize = 6;

/// Headline figures for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_spent: Decimal,
    pub this_month: Decimal,
    /// Spending since the most recent Sunday (inclusive).
    pub this_week: Decimal,
    pub average_expense: Decimal,
}

impl DashboardStats {
    pub fn compute(
        expenses: &[Expense],
        today: NaiveDate,
    ) -> Self {
        let start_of_month = today - Duration::days(i64::from(today.day0()));
        let start_of_week =
            today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));

        let total_since = |start: NaiveDate| -> Decimal {
            expenses
                .iter()
                .filter(|e| e.date >= start)
                .map(|e| e.amount)
                .sum()
        };

        let total_spent: Decimal = expenses.iter().map(|e| e.amount).sum();
        let average_expense = if expenses.is_empty() {
            Decimal::ZERO
        } else {
            total_spent / Decimal::from(expenses.len())
        };

        Self {
            total_spent,
            this_month: total_since(start_of_month),
            this_week: total_since(start_of_week),
            average_expense,
        }
    }
}

/// One slice of the spending-by-category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: Decimal,
    /// Share of all spending, rounded to a whole percent.
    pub percentage: Decimal,
    pub color: &'static str,
}

/// Spending per category, largest first. Categories with no spending are left out.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_default() += expense.amount;
    }

    let grand_total: Decimal = totals.values().copied().sum();

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(category, amount)| CategoryTotal {
            category,
            amount,
            percentage: round_whole(share_percent(amount, grand_total)),
            color: category.color(),
        })
        .collect();

    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
    breakdown
}

/// One bar of the monthly spending chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub period: BudgetPeriod,
    pub label: &'static str,
    /// Rounded to whole currency units.
    pub amount: Decimal,
}

/// Spending for the last [`MONTHLY_WINDOW`] calendar months ending with
/// `today`'s month, oldest first. Months without spending show zero.
pub fn monthly_totals(
    expenses: &[Expense],
    today: NaiveDate,
) -> Vec<MonthlyTotal> {
    let mut periods = Vec::with_capacity(MONTHLY_WINDOW);
    let mut period = BudgetPeriod::from_date(today);
    for _ in 0..MONTHLY_WINDOW {
        periods.push(period);
        period = period.previous();
    }
    periods.reverse();

    periods
        .into_iter()
        .map(|period| {
            let spent: Decimal = expenses
                .iter()
                .filter(|e| period.contains(e.date))
                .map(|e| e.amount)
                .sum();
            MonthlyTotal {
                period,
                label: period.short_label(),
                amount: round_whole(spent),
            }
        })
        .collect()
}

/// Number of expenses per category. Every category is present, zero if unused.
pub fn category_counts(expenses: &[Expense]) -> BTreeMap<ExpenseCategory, usize> {
    let mut counts: BTreeMap<ExpenseCategory, usize> = ExpenseCategory::all()
        .iter()
        .map(|c| (*c, 0))
        .collect();
    for expense in expenses {
        *counts.entry(expense.category).or_default() += 1;
    }
    counts
}

/// Expenses in `category`, or all of them for `None`.
pub fn filter_by_category(
    expenses: &[Expense],
    category: Option<ExpenseCategory>,
) -> Vec<&Expense> {
    expenses
        .iter()
        .filter(|e| category.is_none_or(|c| e.category == c))
        .collect()
}

/// A 1-based page of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slices out page `page` (1-based) of `per_page` items.
    ///
    /// Returns `None` for page 0, pages past the end, or `per_page == 0`.
    /// An empty list still has a (blank) first page.
    pub fn of(
        items: &'a [T],
        page: usize,
        per_page: usize,
    ) -> Option<Self> {
        if per_page == 0 || page == 0 {
            return None;
        }
        let total_pages = items.len().div_ceil(per_page);
        if page > total_pages.max(1) {
            return None;
        }

        let start = (page - 1) * per_page;
        let end = (start + per_page).min(items.len());
        Some(Self {
            items: &items[start.min(end)..end],
            page,
            total_pages,
            total_items: items.len(),
        })
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
