//! Plain-text rendering of calculation results.

use std::fmt;

use rust_decimal::Decimal;
use tax_core::format::{format_currency, format_percent};
use tax_core::{IncomeType, TaxCalculationInput, TaxCalculationResult};

/// Full summary of one calculation, followed by its bracket breakdown.
pub struct ResultReport<'a> {
    pub input: &'a TaxCalculationInput,
    pub result: &'a TaxCalculationResult,
    pub currency: &'a str,
}

impl ResultReport<'_> {
    fn money(
        &self,
        amount: Decimal,
    ) -> String {
        format_currency(amount, self.currency)
    }
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.result;
        let reliefs = &result.reliefs;

        if self.input.income_type == IncomeType::Monthly {
            writeln!(
                f,
                "Monthly income:     {}",
                self.money(self.input.gross_income)
            )?;
        }
        writeln!(f, "Gross income:       {}", self.money(result.gross_income))?;
        writeln!(f, "Reliefs:            {}", self.money(reliefs.total))?;
        writeln!(f, "  Pension:          {}", self.money(reliefs.pension))?;
        writeln!(f, "  NHF:              {}", self.money(reliefs.nhf))?;
        writeln!(f, "  NHIS:             {}", self.money(reliefs.nhis))?;
        writeln!(f, "  Life assurance:   {}", self.money(reliefs.life_assurance))?;
        writeln!(f, "  Other:            {}", self.money(reliefs.other))?;
        writeln!(f, "Taxable income:     {}", self.money(result.taxable_income))?;
        writeln!(f, "Total tax:          {}", self.money(result.total_tax))?;
        writeln!(f, "Net income:         {}", self.money(result.net_income))?;
        writeln!(f, "Effective rate:     {}", format_percent(result.effective_rate))?;
        writeln!(f, "Monthly tax:        {}", self.money(result.monthly_tax()))?;
        writeln!(
            f,
            "Monthly net income: {}",
            self.money(result.monthly_net_income())
        )?;
        writeln!(f)?;

        if result.breakdown.is_empty() {
            return writeln!(f, "No taxable income.");
        }

        writeln!(
            f,
            "{:>4}  {:>7}  {:>20}  {:>18}",
            "S/N", "Rate", "Income in bracket", "Tax"
        )?;
        for row in &result.breakdown {
            writeln!(
                f,
                "{:>4}  {:>7}  {:>20}  {:>18}",
                row.bracket_id,
                format_percent(row.rate),
                self.money(row.income_in_bracket),
                self.money(row.tax_in_bracket),
            )?;
        }
        Ok(())
    }
}

/// One line per row of a batch run, plus a totals line.
pub struct BatchReport<'a> {
    pub rows: &'a [(TaxCalculationInput, TaxCalculationResult)],
    pub currency: &'a str,
}

impl fmt::Display for BatchReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:>4}  {:<7}  {:>18}  {:>18}  {:>18}  {:>7}",
            "Row", "Type", "Gross (annual)", "Taxable", "Tax", "Rate"
        )?;
        for (index, (input, result)) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{:>4}  {:<7}  {:>18}  {:>18}  {:>18}  {:>7}",
                index + 1,
                input.income_type.as_str(),
                format_currency(result.gross_income, self.currency),
                format_currency(result.taxable_income, self.currency),
                format_currency(result.total_tax, self.currency),
                format_percent(result.effective_rate),
            )?;
        }

        let total_tax: Decimal = self.rows.iter().map(|(_, r)| r.total_tax).sum();
        writeln!(
            f,
            "{} rows, total tax {}",
            self.rows.len(),
            format_currency(total_tax, self.currency)
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{ProgressiveTaxCalculator, TaxSchedule};

    use super::*;

    fn calculate(input: &TaxCalculationInput) -> TaxCalculationResult {
        let schedule = TaxSchedule::nigeria_2024();
        ProgressiveTaxCalculator::new(&schedule).calculate(input)
    }

    #[test]
    fn result_report_lists_summary_and_breakdown() {
        let input = TaxCalculationInput::annual(dec!(4000000)).without_reliefs();
        let result = calculate(&input);

        let text = ResultReport {
            input: &input,
            result: &result,
            currency: "₦",
        }
        .to_string();

        assert!(text.contains("Gross income:       ₦4,000,000.00"));
        assert!(text.contains("Total tax:          ₦510,000.00"));
        assert!(text.contains("Effective rate:     12.75%"));
        assert!(text.contains("Monthly tax:        ₦42,500.00"));
        assert!(!text.contains("Monthly income:"));
        // header plus three brackets
        let table_rows = text.lines().skip_while(|l| !l.contains("S/N")).count();
        assert_eq!(table_rows, 4);
    }

    #[test]
    fn result_report_shows_monthly_figure_for_monthly_input() {
        let input = TaxCalculationInput::monthly(dec!(100000));
        let result = calculate(&input);

        let text = ResultReport {
            input: &input,
            result: &result,
            currency: "₦",
        }
        .to_string();

        assert!(text.starts_with("Monthly income:     ₦100,000.00\n"));
        assert!(text.contains("Gross income:       ₦1,200,000.00"));
    }

    #[test]
    fn result_report_for_zero_income_has_no_table() {
        let input = TaxCalculationInput::annual(dec!(0));
        let result = calculate(&input);

        let text = ResultReport {
            input: &input,
            result: &result,
            currency: "$",
        }
        .to_string();

        assert!(text.ends_with("No taxable income.\n"));
        assert!(!text.contains("S/N"));
    }

    #[test]
    fn batch_report_totals_tax() {
        let rows: Vec<_> = [dec!(4000000), dec!(800000)]
            .into_iter()
            .map(|gross| {
                let input = TaxCalculationInput::annual(gross).without_reliefs();
                let result = calculate(&input);
                (input, result)
            })
            .collect();

        let text = BatchReport {
            rows: &rows,
            currency: "₦",
        }
        .to_string();

        assert!(text.contains("annual"));
        assert!(text.ends_with("2 rows, total tax ₦510,000.00\n"));
    }
}
