//! Ranked result tables.
//!
//! A [`ResultTable`] is the boundary between the engine and its consumers:
//! an ordered sequence of [`ScoredResult`] records, best first. With the
//! `export` feature, [`CsvExport`] writes a table as CSV and [`read_csv`]
//! parses it back.

#[cfg(feature = "export")]
mod export;
mod types;

#[cfg(feature = "export")]
pub use export::{read_csv, read_path, CsvExport, ExportError, ExportRow, NAME_SEPARATOR};
pub use types::{ResultTable, ScoredResult};
