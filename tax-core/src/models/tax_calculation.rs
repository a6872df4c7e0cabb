use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::IncomeType;

/// Default pension contribution rate (percent of gross income).
pub const DEFAULT_PENSION_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 0);
/// Default National Housing Fund rate (percent of gross income).
pub const DEFAULT_NHF_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 1);
/// Default National Health Insurance Scheme rate (percent of gross income).
pub const DEFAULT_NHIS_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Inputs to a progressive tax calculation.
///
/// Rates are percentages (`8` means 8%) applied to the annualized gross
/// income. `life_assurance` and `other_reliefs` are flat amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCalculationInput {
    pub income_type: IncomeType,
    pub gross_income: Decimal,
    pub pension_rate: Decimal,
    pub nhf_rate: Decimal,
    pub nhis_rate: Decimal,
    pub life_assurance: Decimal,
    pub other_reliefs: Decimal,
}

impl Default for TaxCalculationInput {
    fn default() -> Self {
        Self {
            income_type: IncomeType::Annual,
            gross_income: Decimal::ZERO,
            pension_rate: DEFAULT_PENSION_RATE,
            nhf_rate: DEFAULT_NHF_RATE,
            nhis_rate: DEFAULT_NHIS_RATE,
            life_assurance: Decimal::ZERO,
            other_reliefs: Decimal::ZERO,
        }
    }
}

impl TaxCalculationInput {
    /// Annual income with the default relief rates.
    pub fn annual(gross_income: Decimal) -> Self {
        Self {
            gross_income,
            ..Default::default()
        }
    }

    /// Monthly income with the default relief rates.
    pub fn monthly(gross_income: Decimal) -> Self {
        Self {
            income_type: IncomeType::Monthly,
            gross_income,
            ..Default::default()
        }
    }

    /// Same income with every relief set to zero.
    pub fn without_reliefs(self) -> Self {
        Self {
            pension_rate: Decimal::ZERO,
            nhf_rate: Decimal::ZERO,
            nhis_rate: Decimal::ZERO,
            life_assurance: Decimal::ZERO,
            other_reliefs: Decimal::ZERO,
            ..self
        }
    }
}

/// Itemized reliefs deducted from gross income, all annual amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefBreakdown {
    pub pension: Decimal,
    pub nhf: Decimal,
    pub nhis: Decimal,
    pub life_assurance: Decimal,
    pub other: Decimal,
    pub total: Decimal,
}

/// The share of taxable income that landed in one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    /// Sequence number of the bracket.
    pub bracket_id: u32,
    pub income_in_bracket: Decimal,
    pub rate: Decimal,
    pub tax_in_bracket: Decimal,
}

/// Outcome of a progressive tax calculation. All figures are annual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub gross_income: Decimal,
    pub reliefs: ReliefBreakdown,
    /// Gross income minus total reliefs, never below zero.
    pub taxable_income: Decimal,
    pub total_tax: Decimal,
    pub net_income: Decimal,
    /// Total tax as a percentage of gross income; zero for zero income.
    pub effective_rate: Decimal,
    /// Brackets that received income, in schedule order.
    pub breakdown: Vec<BracketContribution>,
}

impl TaxCalculationResult {
    pub fn monthly_tax(&self) -> Decimal {
        self.total_tax / Decimal::from(12)
    }

    pub fn monthly_net_income(&self) -> Decimal {
        self.net_income / Decimal::from(12)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_input_carries_standard_relief_rates() {
        let input = TaxCalculationInput::default();

        assert_eq!(input.income_type, IncomeType::Annual);
        assert_eq!(input.pension_rate, dec!(8));
        assert_eq!(input.nhf_rate, dec!(2.5));
        assert_eq!(input.nhis_rate, dec!(5));
        assert_eq!(input.life_assurance, dec!(0));
        assert_eq!(input.other_reliefs, dec!(0));
    }

    #[test]
    fn without_reliefs_keeps_income_fields() {
        let input = TaxCalculationInput::monthly(dec!(100000)).without_reliefs();

        assert_eq!(input.income_type, IncomeType::Monthly);
        assert_eq!(input.gross_income, dec!(100000));
        assert_eq!(input.pension_rate, dec!(0));
        assert_eq!(input.nhf_rate, dec!(0));
        assert_eq!(input.nhis_rate, dec!(0));
    }
}
