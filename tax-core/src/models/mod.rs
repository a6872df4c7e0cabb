mod budget;
mod expense;
mod income_type;
mod tax_bracket;
mod tax_calculation;

pub use budget::{Budget, BudgetError, BudgetPeriod};
pub use expense::{Expense, ExpenseCategory, ParseCategoryError};
pub use income_type::{IncomeType, ParseIncomeTypeError};
pub use tax_bracket::TaxBracket;
pub use tax_calculation::{
    BracketContribution, DEFAULT_NHF_RATE, DEFAULT_NHIS_RATE, DEFAULT_PENSION_RATE,
    ReliefBreakdown, TaxCalculationInput, TaxCalculationResult,
};
