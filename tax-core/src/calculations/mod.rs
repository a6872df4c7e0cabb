//! Tax calculation modules.
//!
//! [`ProgressiveTaxCalculator`] walks a [`TaxSchedule`](crate::TaxSchedule)
//! bracket by bracket; [`common`] holds the shared decimal helpers.

pub mod common;
pub mod progressive;

pub use progressive::ProgressiveTaxCalculator;
