pub mod budget;
pub mod calculations;
pub mod expenses;
pub mod format;
pub mod models;
pub mod schedule;
pub mod validation;

pub use calculations::ProgressiveTaxCalculator;
pub use models::*;
pub use schedule::{ScheduleError, TaxSchedule};
pub use validation::{FieldError, MAX_AMOUNT, TaxForm, TaxInputError};
