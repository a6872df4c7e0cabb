//! Budget status evaluation.
//!
//! Compares what was spent in a period against each category budget and
//! summarizes the period as a whole.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::{round_whole, share_percent};
use crate::format::format_number;
use crate::{Budget, BudgetPeriod, Expense, ExpenseCategory};

/// How one budget stands against its spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Decimal,
    /// Budget minus spending; negative once the budget is exceeded.
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub is_over_budget: bool,
    pub is_near_limit: bool,
    pub alerts: Vec<String>,
}

impl BudgetStatus {
    pub fn evaluate(
        budget: &Budget,
        spent: Decimal,
    ) -> Self {
        let remaining = budget.amount - spent;
        let percent_used = share_percent(spent, budget.amount);
        let is_over_budget = spent > budget.amount;
        let is_near_limit =
            budget.alert_enabled && !is_over_budget && percent_used >= budget.alert_threshold;

        let mut alerts = Vec::new();
        if is_over_budget {
            alerts.push(format!(
                "{} budget exceeded by {}",
                budget.category,
                format_number(-remaining)
            ));
        } else if is_near_limit {
            alerts.push(format!(
                "{} budget is {}% used",
                budget.category,
                round_whole(percent_used)
            ));
        }

        Self {
            budget: budget.clone(),
            spent,
            remaining,
            percent_used,
            is_over_budget,
            is_near_limit,
            alerts,
        }
    }

    /// Short status text: "Over Budget", "Near Limit" or "On Track".
    pub fn label(&self) -> &'static str {
        if self.is_over_budget {
            "Over Budget"
        } else if self.is_near_limit {
            "Near Limit"
        } else {
            "On Track"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub total_categories: usize,
    pub over_budget_count: usize,
    pub near_limit_count: usize,
}

/// Every budget of one period, evaluated together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetReport {
    pub period: BudgetPeriod,
    pub budgets: Vec<BudgetStatus>,
    pub total_budget: Decimal,
    /// All spending in the period, including categories without a budget.
    pub total_spent: Decimal,
    pub summary: BudgetSummary,
}

impl BudgetReport {
    /// Evaluates the budgets that belong to `period` against the expenses
    /// dated inside it. Budgets and expenses from other periods are ignored.
    pub fn build(
        period: BudgetPeriod,
        budgets: &[Budget],
        expenses: &[Expense],
    ) -> Self {
        let in_period: Vec<&Expense> = expenses
            .iter()
            .filter(|e| period.contains(e.date))
            .collect();

        let statuses: Vec<BudgetStatus> = budgets
            .iter()
            .filter(|b| b.period == period)
            .map(|budget| {
                let spent = in_period
                    .iter()
                    .filter(|e| e.category == budget.category)
                    .map(|e| e.amount)
                    .sum();
                BudgetStatus::evaluate(budget, spent)
            })
            .collect();

        let summary = BudgetSummary {
            total_categories: statuses.len(),
            over_budget_count: statuses.iter().filter(|s| s.is_over_budget).count(),
            near_limit_count: statuses.iter().filter(|s| s.is_near_limit).count(),
        };

        Self {
            period,
            total_budget: statuses.iter().map(|s| s.budget.amount).sum(),
            total_spent: in_period.iter().map(|e| e.amount).sum(),
            budgets: statuses,
            summary,
        }
    }

    pub fn status_for(
        &self,
        category: ExpenseCategory,
    ) -> Option<&BudgetStatus> {
        self.budgets.iter().find(|s| s.budget.category == category)
    }
}
