//! Progressive (marginal-rate) income tax calculation.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualize gross income (monthly × 12) |
//! | 2    | Reliefs: pension, NHF and NHIS as a percentage of gross, plus flat life assurance and other reliefs |
//! | 3    | Taxable income: gross − reliefs, floored at 0 |
//! | 4    | Walk the brackets in order, taxing the slice of income inside each one |
//! | 5    | Net income: gross − total tax |
//! | 6    | Effective rate: total tax ÷ gross × 100 (0 for zero income) |
//!
//! No rounding is applied along the way, so the breakdown always sums to the
//! taxable income exactly.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::ProgressiveTaxCalculator;
//! use tax_core::{TaxCalculationInput, TaxSchedule};
//!
//! let schedule = TaxSchedule::nigeria_2024();
//! let calculator = ProgressiveTaxCalculator::new(&schedule);
//!
//! let input = TaxCalculationInput::annual(dec!(4000000)).without_reliefs();
//! let result = calculator.calculate(&input);
//!
//! assert_eq!(result.total_tax, dec!(510000));
//! assert_eq!(result.effective_rate, dec!(12.75));
//! assert_eq!(result.breakdown.len(), 3);
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, min, percent_of, share_percent};
use crate::validation::TaxInputError;
use crate::{
    BracketContribution, ReliefBreakdown, TaxCalculationInput, TaxCalculationResult, TaxSchedule,
};

/// Calculator for progressive income tax over a borrowed [`TaxSchedule`].
///
/// The calculator holds no state besides the schedule reference, so one
/// instance can serve any number of calculations.
#[derive(Debug, Clone, Copy)]
pub struct ProgressiveTaxCalculator<'a> {
    schedule: &'a TaxSchedule,
}

impl<'a> ProgressiveTaxCalculator<'a> {
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'a TaxSchedule {
        self.schedule
    }

    /// Validates `input` and then calculates.
    ///
    /// # Errors
    ///
    /// Returns [`TaxInputError::InvalidInput`] for negative income, negative
    /// flat reliefs, or relief rates outside 0–100.
    pub fn calculate_checked(
        &self,
        input: &TaxCalculationInput,
    ) -> Result<TaxCalculationResult, TaxInputError> {
        input.validate()?;
        Ok(self.calculate(input))
    }

    /// Calculates tax for already validated input.
    ///
    /// This is a total function: it never fails and never produces partial
    /// results.
    pub fn calculate(
        &self,
        input: &TaxCalculationInput,
    ) -> TaxCalculationResult {
        let gross_income = input.income_type.annualize(input.gross_income);
        let reliefs = self.reliefs(gross_income, input);
        let taxable_income = self.taxable_income(gross_income, reliefs.total);
        let (total_tax, breakdown) = self.tax_by_brackets(taxable_income);
        let net_income = gross_income - total_tax;
        let effective_rate = self.effective_rate(total_tax, gross_income);

        debug!(
            %gross_income,
            reliefs = %reliefs.total,
            %taxable_income,
            %total_tax,
            brackets = breakdown.len(),
            "calculated progressive tax"
        );

        TaxCalculationResult {
            gross_income,
            reliefs,
            taxable_income,
            total_tax,
            net_income,
            effective_rate,
            breakdown,
        }
    }

    /// Rate of the bracket holding the last unit of `taxable_income`.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.schedule
            .bracket_for(taxable_income)
            .map(|b| b.rate)
            .unwrap_or_else(|| {
                self.schedule
                    .brackets()
                    .first()
                    .map(|b| b.rate)
                    .unwrap_or(Decimal::ZERO)
            })
    }

    fn reliefs(
        &self,
        gross_income: Decimal,
        input: &TaxCalculationInput,
    ) -> ReliefBreakdown {
        let pension = percent_of(gross_income, input.pension_rate);
        let nhf = percent_of(gross_income, input.nhf_rate);
        let nhis = percent_of(gross_income, input.nhis_rate);
        let total = pension + nhf + nhis + input.life_assurance + input.other_reliefs;

        ReliefBreakdown {
            pension,
            nhf,
            nhis,
            life_assurance: input.life_assurance,
            other: input.other_reliefs,
            total,
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        total_reliefs: Decimal,
    ) -> Decimal {
        max(gross_income - total_reliefs, Decimal::ZERO)
    }

    fn tax_by_brackets(
        &self,
        taxable_income: Decimal,
    ) -> (Decimal, Vec<BracketContribution>) {
        let mut remaining = taxable_income;
        let mut total_tax = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for bracket in self.schedule.brackets() {
            if remaining <= Decimal::ZERO {
                break;
            }

            // The top bracket has no width and absorbs whatever is left.
            let income_in_bracket = match bracket.width() {
                Some(width) => min(remaining, width),
                None => remaining,
            };
            let tax_in_bracket = percent_of(income_in_bracket, bracket.rate);

            if income_in_bracket > Decimal::ZERO {
                total_tax += tax_in_bracket;
                breakdown.push(BracketContribution {
                    bracket_id: bracket.sequence_number,
                    income_in_bracket,
                    rate: bracket.rate,
                    tax_in_bracket,
                });
                remaining -= income_in_bracket;
            }
        }

        (total_tax, breakdown)
    }

    fn effective_rate(
        &self,
        total_tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income > Decimal::ZERO {
            share_percent(total_tax, gross_income)
        } else {
            Decimal::ZERO
        }
    }
}
