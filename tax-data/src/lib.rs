//! CSV loading for bracket tables and batches of calculation inputs.

pub mod income;
pub mod loader;

pub use income::{
    CsvLoadError, load_from_file, load_from_file_with, load_from_str, load_from_str_with,
};
pub use loader::{BracketLoaderError, BracketRecord, BracketTableLoader};
