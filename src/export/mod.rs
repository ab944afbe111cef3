//! Export functionality for analysis
//!
//! CSV export of roulette spin logs and per-agent experience summaries.

mod csv_export;

pub use csv_export::{CsvExporter, read_spins};
