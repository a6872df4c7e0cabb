//! End-to-end calculator scenarios against the built-in 2024 schedule,
//! driven through the public API the way a front-end would use it.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::format::{NAIRA, format_currency, format_percent};
use tax_core::{
    BracketContribution, IncomeType, ProgressiveTaxCalculator, TaxCalculationInput, TaxForm,
    TaxSchedule,
};

fn calculate(input: &TaxCalculationInput) -> tax_core::TaxCalculationResult {
    let schedule = TaxSchedule::nigeria_2024();
    ProgressiveTaxCalculator::new(&schedule)
        .calculate_checked(input)
        .expect("input should be valid")
}

#[test]
fn zero_income_produces_empty_result() {
    let result = calculate(&TaxCalculationInput::annual(dec!(0)));

    assert_eq!(result.taxable_income, dec!(0));
    assert_eq!(result.total_tax, dec!(0));
    assert_eq!(result.effective_rate, dec!(0));
    assert!(result.breakdown.is_empty());
}

#[test]
fn income_at_first_boundary_is_untaxed() {
    let result = calculate(&TaxCalculationInput::annual(dec!(800000)).without_reliefs());

    assert_eq!(result.total_tax, dec!(0));
    assert_eq!(
        result.breakdown,
        vec![BracketContribution {
            bracket_id: 1,
            income_in_bracket: dec!(800000),
            rate: dec!(0),
            tax_in_bracket: dec!(0),
        }]
    );
}

#[test]
fn four_million_spans_three_brackets() {
    let result = calculate(&TaxCalculationInput::annual(dec!(4000000)).without_reliefs());

    assert_eq!(result.total_tax, dec!(510000));
    assert_eq!(result.effective_rate, dec!(12.75));
    assert_eq!(format_currency(result.total_tax, NAIRA), "₦510,000.00");
    assert_eq!(format_percent(result.effective_rate), "12.75%");
}

#[test]
fn monthly_income_is_annualized_before_reliefs() {
    let result = calculate(&TaxCalculationInput::monthly(dec!(100000)));

    assert_eq!(result.gross_income, dec!(1200000));
    // 15.5% of the annual figure
    assert_eq!(result.reliefs.total, dec!(186000));
    assert_eq!(result.taxable_income, dec!(1014000));
}

#[test]
fn reliefs_above_income_clamp_taxable_income() {
    let input = TaxCalculationInput {
        life_assurance: dec!(900000),
        other_reliefs: dec!(900000),
        ..TaxCalculationInput::annual(dec!(1500000))
    };

    let result = calculate(&input);

    assert_eq!(result.taxable_income, dec!(0));
    assert_eq!(result.total_tax, dec!(0));
    assert_eq!(result.net_income, dec!(1500000));
}

#[test]
fn form_to_result_round_trip() {
    let form = TaxForm {
        income_type: "monthly".to_string(),
        gross_income: "250,000".to_string(),
        ..TaxForm::default()
    };

    let input = form.parse().expect("form is valid");
    let result = calculate(&input);

    assert_eq!(input.income_type, IncomeType::Monthly);
    assert_eq!(result.gross_income, dec!(3000000));
    let allocated: Decimal = result.breakdown.iter().map(|b| b.income_in_bracket).sum();
    assert_eq!(allocated, result.taxable_income);
}

#[test]
fn calculations_share_one_schedule() {
    let schedule = TaxSchedule::nigeria_2024();
    let calculator = ProgressiveTaxCalculator::new(&schedule);

    let low = calculator.calculate(&TaxCalculationInput::annual(dec!(2000000)));
    let high = calculator.calculate(&TaxCalculationInput::annual(dec!(20000000)));

    assert!(low.total_tax < high.total_tax);
    assert!(low.effective_rate < high.effective_rate);
}
