//! Integration tests for loading the shipped bracket table and income batches
//! and feeding them through the calculator.

use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::{IncomeType, ProgressiveTaxCalculator, TaxSchedule};
use tax_data::{BracketLoaderError, BracketTableLoader, CsvLoadError, load_from_file};

const NIGERIA_2024_CSV: &str = include_str!("../test-data/nigeria_paye_2024.csv");

fn test_data(relative: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn test_shipped_table_matches_built_in_schedule() {
    let loaded = BracketTableLoader::load(NIGERIA_2024_CSV.as_bytes(), "nigeria_paye_2024")
        .expect("shipped table should be valid");

    assert_eq!(loaded.brackets(), TaxSchedule::nigeria_2024().brackets());
}

#[test]
fn test_load_file_names_schedule_after_file_stem() {
    let schedule = BracketTableLoader::load_file(&test_data("test-data/nigeria_paye_2024.csv"))
        .expect("shipped table should load from disk");

    assert_eq!(schedule.name(), "nigeria_paye_2024");
    assert_eq!(schedule.top_rate(), dec!(25));
    // Published numbering skips 6.
    let numbers: Vec<u32> = schedule.brackets().iter().map(|b| b.sequence_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 7]);
}

#[test]
fn test_loaded_schedule_drives_calculator() {
    let schedule = BracketTableLoader::load(NIGERIA_2024_CSV.as_bytes(), "csv").unwrap();
    let inputs = load_from_file(&test_data("tests/fixtures/incomes.csv"))
        .expect("fixture should parse");
    let calculator = ProgressiveTaxCalculator::new(&schedule);

    let results: Vec<_> = inputs.iter().map(|i| calculator.calculate(i)).collect();

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[1].income_type, IncomeType::Monthly);

    // 4,000,000 with no reliefs
    assert_eq!(results[0].total_tax, dec!(510000));
    assert_eq!(results[0].effective_rate, dec!(12.75));

    // 100,000 a month with the default relief rates
    assert_eq!(results[1].gross_income, dec!(1200000));
    assert_eq!(results[1].taxable_income, dec!(1014000));
    assert_eq!(results[1].total_tax, dec!(32100));

    // Reliefs larger than income
    assert_eq!(results[2].taxable_income, dec!(0));
    assert_eq!(results[2].net_income, dec!(1500000));
}

#[test]
fn test_unordered_table_is_sorted_on_load() {
    let csv = "sn,rate,annual_min,annual_max,monthly_min,monthly_max
2,20,1200,,100,
1,10,0,1200,0,100
";

    let schedule = BracketTableLoader::load(csv.as_bytes(), "unordered").unwrap();

    assert_eq!(schedule.brackets()[0].sequence_number, 1);
    assert_eq!(schedule.brackets()[1].sequence_number, 2);
}

#[test]
fn test_table_with_bounded_top_is_rejected() {
    let csv = "sn,rate,annual_min,annual_max,monthly_min,monthly_max
1,10,0,1200,0,100
";

    let err = BracketTableLoader::load(csv.as_bytes(), "bounded").unwrap_err();

    assert!(matches!(err, BracketLoaderError::Schedule(_)));
}

#[test]
fn test_missing_income_file_reports_io_error() {
    let err = load_from_file(&test_data("tests/fixtures/nope.csv")).unwrap_err();

    assert!(matches!(err, CsvLoadError::Io { .. }));
}
