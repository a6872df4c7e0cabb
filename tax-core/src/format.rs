//! Money formatting and parsing for display and form input.
//!
//! Amounts are shown with two decimal places, comma thousands grouping and a
//! currency symbol in front, e.g. `₦1,234,567.89`.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::TaxSchedule;
use crate::calculations::common::round_half_up;

/// Symbol for the Nigerian naira.
pub const NAIRA: &str = "₦";

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn sign(amount: Decimal) -> &'static str {
    if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    }
}

/// Formats `amount` with two decimals and thousands separators.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_number;
///
/// assert_eq!(format_number(dec!(1234567.891)), "1,234,567.89");
/// assert_eq!(format_number(dec!(-0.5)), "-0.50");
/// ```
pub fn format_number(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}{}.{}", sign(rounded), group_thousands(whole), fraction)
}

/// Formats `amount` as money with the given currency symbol.
///
/// Negative amounts put the minus sign before the symbol (`-₦500.00`).
pub fn format_currency(
    amount: Decimal,
    symbol: &str,
) -> String {
    let rounded = round_half_up(amount);
    format!(
        "{}{}{}",
        sign(rounded),
        symbol,
        format_number(rounded.abs())
    )
}

/// Formats a percentage with two decimals, e.g. `12.75%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate))
}

/// Like [`format_number`] but drops the decimals for whole amounts.
/// Used for bracket band labels (`800,000`, `66,666.67`).
pub fn format_compact(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        format!("{}{}", sign(amount), group_thousands(&format!("{:.0}", amount.abs())))
    } else {
        format_number(amount)
    }
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `Ok(None)` for empty or whitespace-only input.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if normalize_decimal_input(s).is_empty() {
        Ok(None)
    } else {
        parse_decimal(s).map(Some)
    }
}

/// The bands of a schedule with their rates and annual and monthly labels,
/// headed by the schedule name.
pub struct BracketTable<'a> {
    pub schedule: &'a TaxSchedule,
}

impl fmt::Display for BracketTable<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.schedule.name())?;
        writeln!(
            f,
            "{:>4}  {:>7}  {:<22}  {:<22}",
            "S/N", "Rate", "Annual band", "Monthly band"
        )?;
        for bracket in self.schedule.brackets() {
            writeln!(
                f,
                "{:>4}  {:>7}  {:<22}  {:<22}",
                bracket.sequence_number,
                format_percent(bracket.rate),
                bracket.annual_band(),
                bracket.monthly_band(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_currency_groups_thousands_and_rounds() {
        assert_eq!(format_currency(dec!(510000), NAIRA), "₦510,000.00");
        assert_eq!(format_currency(dec!(1234.565), NAIRA), "₦1,234.57");
        assert_eq!(format_currency(dec!(0), NAIRA), "₦0.00");
    }

    #[test]
    fn format_currency_puts_sign_before_symbol() {
        assert_eq!(format_currency(dec!(-2500), NAIRA), "-₦2,500.00");
    }

    #[test]
    fn format_currency_accepts_other_symbols() {
        assert_eq!(format_currency(dec!(99.9), "$"), "$99.90");
    }

    #[test]
    fn format_number_handles_small_and_exact_groups() {
        assert_eq!(format_number(dec!(999)), "999.00");
        assert_eq!(format_number(dec!(1000)), "1,000.00");
        assert_eq!(format_number(dec!(100000)), "100,000.00");
    }

    #[test]
    fn format_number_does_not_print_negative_zero() {
        assert_eq!(format_number(dec!(-0.001)), "0.00");
    }

    #[test]
    fn format_percent_uses_two_decimals() {
        assert_eq!(format_percent(dec!(12.75)), "12.75%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
        assert_eq!(format_percent(dec!(7.123456)), "7.12%");
    }

    #[test]
    fn format_compact_drops_zero_fraction() {
        assert_eq!(format_compact(dec!(50000000)), "50,000,000");
        assert_eq!(format_compact(dec!(800000.00)), "800,000");
        assert_eq!(format_compact(dec!(66666.67)), "66,666.67");
    }

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("  4,000,000 ").unwrap(), dec!(4000000));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("12a").is_err());
    }

    #[test]
    fn parse_optional_decimal_distinguishes_empty_from_invalid() {
        assert_eq!(parse_optional_decimal("").unwrap(), None);
        assert_eq!(parse_optional_decimal("2.5").unwrap(), Some(dec!(2.5)));
        assert!(parse_optional_decimal("two").is_err());
    }

    #[test]
    fn bracket_table_has_one_line_per_band() {
        let schedule = TaxSchedule::nigeria_2024();

        let text = BracketTable {
            schedule: &schedule,
        }
        .to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + schedule.brackets().len());
        assert_eq!(lines[0], "Nigeria PAYE 2024");
        assert!(lines[2].contains("First 800,000"));
        assert!(lines[2].contains("0.00%"));
        assert!(lines[7].contains("Above 50,000,000"));
        assert!(lines[7].starts_with("   7"));
    }
}
