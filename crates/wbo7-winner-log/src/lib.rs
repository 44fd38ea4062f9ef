//! Spreadsheet-compatible winner log for WBO7.
//!
//! Winners are appended to a CSV file whose first line is the header row
//! `Date,Name,NationalId,Email,BetNumber`. The file is only ever appended to;
//! a process-wide lock serialises writers.

mod log;

pub mod error;

pub use error::{Error, Result};
pub use log::{CsvWinnerLog, HEADER};
