//! Record sink: partner rows in and out
//!
//! This module handles:
//! - The profile record model and CSV table
//! - Reading and writing CSV files
//! - Converting a CSV into a styled spreadsheet
//! - Run statistics

mod csv_io;
mod record;
mod spreadsheet;
pub mod stats;

pub use csv_io::{read_table, write_table};
pub use record::{ProfileRecord, RecordTable, DEFAULT_HEADER};
pub use spreadsheet::export_spreadsheet;
pub use stats::{print_statistics, RunStatistics};
