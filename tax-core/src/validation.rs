//! Boundary validation for calculation input.
//!
//! [`TaxForm`] holds field values exactly as a user typed them and turns them
//! into a [`TaxCalculationInput`], collecting every field error at once.
//! [`TaxCalculationInput::validate`] re-checks typed values that did not come
//! through a form (CSV rows, config files).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::format::{parse_decimal, parse_optional_decimal};
use crate::{IncomeType, TaxCalculationInput};

/// Largest accepted income or flat relief (10^24).
///
/// Annualizing and applying relief rates to anything at or below this stays
/// well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_701_131_776, 466_537_709, 54_210, false, 0);

/// Rejected calculation input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxInputError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl TaxInputError {
    fn invalid(
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxInputError> {
    if value < Decimal::ZERO {
        return Err(TaxInputError::invalid(
            field,
            format!("must be 0 or greater, got {value}"),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(TaxInputError::invalid(
            field,
            format!("value is too large, maximum is {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

fn check_percentage(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxInputError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(TaxInputError::invalid(
            field,
            format!("must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}

impl TaxCalculationInput {
    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxInputError::InvalidInput`] found, in field order.
    pub fn validate(&self) -> Result<(), TaxInputError> {
        check_amount("gross_income", self.gross_income)?;
        check_percentage("pension_rate", self.pension_rate)?;
        check_percentage("nhf_rate", self.nhf_rate)?;
        check_percentage("nhis_rate", self.nhis_rate)?;
        check_amount("life_assurance", self.life_assurance)?;
        check_amount("other_reliefs", self.other_reliefs)?;
        Ok(())
    }
}

/// One failed form field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw tax calculator form values.
///
/// `Default` gives the values a freshly reset form shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxForm {
    pub income_type: String,
    pub gross_income: String,
    pub pension: String,
    pub nhf: String,
    pub nhis: String,
    pub life_assurance: String,
    pub other_reliefs: String,
}

impl Default for TaxForm {
    fn default() -> Self {
        Self {
            income_type: "annual".to_string(),
            gross_income: String::new(),
            pension: "8".to_string(),
            nhf: "2.5".to_string(),
            nhis: "5".to_string(),
            life_assurance: "0".to_string(),
            other_reliefs: "0".to_string(),
        }
    }
}

enum Rule {
    Required,
    Optional,
}

enum Limit {
    /// Up to [`MAX_AMOUNT`].
    Amount,
    /// Up to 100.
    Percentage,
}

impl TaxForm {
    /// Parses and validates every field.
    ///
    /// # Errors
    ///
    /// Returns all field errors when any field is invalid.
    pub fn parse(&self) -> Result<TaxCalculationInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        let income_type = match self.income_type.parse::<IncomeType>() {
            Ok(t) => Some(t),
            Err(e) => {
                errors.push(FieldError::new("income_type", e.to_string()));
                None
            }
        };

        let gross_income = field(
            &mut errors,
            "gross_income",
            &self.gross_income,
            Rule::Required,
            Limit::Amount,
        );
        let pension_rate = field(
            &mut errors,
            "pension",
            &self.pension,
            Rule::Required,
            Limit::Percentage,
        );
        let nhf_rate = field(
            &mut errors,
            "nhf",
            &self.nhf,
            Rule::Required,
            Limit::Percentage,
        );
        let nhis_rate = field(
            &mut errors,
            "nhis",
            &self.nhis,
            Rule::Required,
            Limit::Percentage,
        );
        let life_assurance = field(
            &mut errors,
            "life_assurance",
            &self.life_assurance,
            Rule::Optional,
            Limit::Amount,
        );
        let other_reliefs = field(
            &mut errors,
            "other_reliefs",
            &self.other_reliefs,
            Rule::Optional,
            Limit::Amount,
        );

        match (
            income_type,
            gross_income,
            pension_rate,
            nhf_rate,
            nhis_rate,
            life_assurance,
            other_reliefs,
        ) {
            (
                Some(income_type),
                Some(gross_income),
                Some(pension_rate),
                Some(nhf_rate),
                Some(nhis_rate),
                Some(life_assurance),
                Some(other_reliefs),
            ) if errors.is_empty() => Ok(TaxCalculationInput {
                income_type,
                gross_income,
                pension_rate,
                nhf_rate,
                nhis_rate,
                life_assurance,
                other_reliefs,
            }),
            _ => {
                warn!(count = errors.len(), "tax form rejected");
                Err(errors)
            }
        }
    }
}

/// Parses one numeric field, recording an error and returning `None` on failure.
fn field(
    errors: &mut Vec<FieldError>,
    name: &'static str,
    raw: &str,
    rule: Rule,
    limit: Limit,
) -> Option<Decimal> {
    let parsed = match parse_optional_decimal(raw) {
        Ok(Some(value)) => value,
        Ok(None) => match rule {
            Rule::Required => {
                let message = format!("{} is required", name.replace('_', " "));
                errors.push(FieldError::new(name, message));
                return None;
            }
            Rule::Optional => Decimal::ZERO,
        },
        Err(_) => {
            errors.push(FieldError::new(name, "value must be a number"));
            return None;
        }
    };

    if parsed < Decimal::ZERO {
        errors.push(FieldError::new(name, "value must be 0 or greater"));
        return None;
    }
    match limit {
        Limit::Percentage if parsed > Decimal::ONE_HUNDRED => {
            errors.push(FieldError::new(name, "value cannot exceed 100%"));
            return None;
        }
        Limit::Amount if parsed > MAX_AMOUNT => {
            errors.push(FieldError::new(name, "value is too large"));
            return None;
        }
        _ => {}
    }
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn validate_accepts_defaults() {
        assert_eq!(TaxCalculationInput::annual(dec!(1000)).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_gross_income() {
        let err = TaxCalculationInput::annual(dec!(-5)).validate().unwrap_err();

        assert_eq!(
            err,
            TaxInputError::InvalidInput {
                field: "gross_income",
                reason: "must be 0 or greater, got -5".to_string(),
            }
        );
    }

    #[test]
    fn validate_rejects_rate_above_one_hundred() {
        let input = TaxCalculationInput {
            nhis_rate: dec!(100.5),
            ..TaxCalculationInput::annual(dec!(1000))
        };

        assert!(matches!(
            input.validate(),
            Err(TaxInputError::InvalidInput { field: "nhis_rate", .. })
        ));
    }

    #[test]
    fn validate_accepts_boundary_rates() {
        let input = TaxCalculationInput {
            pension_rate: dec!(0),
            nhf_rate: dec!(100),
            ..TaxCalculationInput::annual(dec!(1000))
        };

        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_flat_relief() {
        let input = TaxCalculationInput {
            life_assurance: dec!(-1),
            ..TaxCalculationInput::annual(dec!(1000))
        };

        assert!(matches!(
            input.validate(),
            Err(TaxInputError::InvalidInput { field: "life_assurance", .. })
        ));
    }

    #[test]
    fn validate_rejects_amounts_above_maximum() {
        let too_big = MAX_AMOUNT + dec!(1);

        assert_eq!(TaxCalculationInput::monthly(MAX_AMOUNT).validate(), Ok(()));
        assert!(matches!(
            TaxCalculationInput::annual(too_big).validate(),
            Err(TaxInputError::InvalidInput { field: "gross_income", .. })
        ));
        let input = TaxCalculationInput {
            other_reliefs: too_big,
            ..TaxCalculationInput::annual(dec!(1000))
        };
        assert!(matches!(
            input.validate(),
            Err(TaxInputError::InvalidInput { field: "other_reliefs", .. })
        ));
    }

    #[test]
    fn form_rejects_huge_amounts() {
        let form = TaxForm {
            gross_income: "9000000000000000000000000000".to_string(),
            life_assurance: "2,000,000,000,000,000,000,000,000".to_string(),
            ..TaxForm::default()
        };

        let errors = form.parse().unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldError::new("gross_income", "value is too large"),
                FieldError::new("life_assurance", "value is too large"),
            ]
        );
    }

    #[test]
    fn form_parses_default_values_with_income() {
        let form = TaxForm {
            gross_income: "4,000,000".to_string(),
            ..TaxForm::default()
        };

        let input = form.parse().unwrap();

        assert_eq!(input, TaxCalculationInput::annual(dec!(4000000)));
    }

    #[test]
    fn form_parses_monthly_income_type() {
        let form = TaxForm {
            income_type: "Monthly".to_string(),
            gross_income: "100000".to_string(),
            ..TaxForm::default()
        };

        assert_eq!(form.parse().unwrap().income_type, IncomeType::Monthly);
    }

    #[test]
    fn form_requires_gross_income() {
        let errors = TaxForm::default().parse().unwrap_err();

        assert_eq!(
            errors,
            vec![FieldError::new("gross_income", "gross income is required")]
        );
    }

    #[test]
    fn form_treats_empty_flat_reliefs_as_zero() {
        let form = TaxForm {
            gross_income: "500000".to_string(),
            life_assurance: String::new(),
            other_reliefs: "  ".to_string(),
            ..TaxForm::default()
        };

        let input = form.parse().unwrap();

        assert_eq!(input.life_assurance, dec!(0));
        assert_eq!(input.other_reliefs, dec!(0));
    }

    #[test]
    fn form_collects_every_field_error() {
        let form = TaxForm {
            income_type: "weekly".to_string(),
            gross_income: "-10".to_string(),
            pension: "150".to_string(),
            nhf: "abc".to_string(),
            ..TaxForm::default()
        };

        let errors = form.parse().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();

        assert_eq!(fields, vec!["income_type", "gross_income", "pension", "nhf"]);
        assert_eq!(errors[1].message, "value must be 0 or greater");
        assert_eq!(errors[2].message, "value cannot exceed 100%");
        assert_eq!(errors[3].message, "value must be a number");
    }
}
