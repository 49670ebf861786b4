//! CSV export of ranked tables.
//!
//! One row per result. Columns, in order:
//!
//! | column        | content                                   |
//! |---------------|-------------------------------------------|
//! | `members`     | member names joined by `", "`             |
//! | one per effect| base total, keyed by [`Effect::key`]      |
//! | `score`       | total score                               |
//! | `bonuses`     | unlocked bonus names joined by `", "`     |
//!
//! Numbers are written with Rust's shortest round-trip formatting unless a
//! fixed precision is requested, so [`read_csv`] recovers them exactly.

use super::types::ResultTable;
use crate::catalog::{Effect, EffectVector};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Separator between names inside the `members` and `bonuses` columns.
pub const NAME_SEPARATOR: &str = ", ";

const MEMBERS: &str = "members";
const SCORE: &str = "score";
const BONUSES: &str = "bonuses";

/// Failure while writing or reading an exported table.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying CSV error.
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error.
    #[error("failed to access export file: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is absent from the header row.
    #[error("missing column `{0}`")]
    MissingColumn(String),

    /// A numeric cell failed to parse.
    #[error("row {row}: invalid number `{value}` in column `{column}`")]
    InvalidNumber {
        /// 1-based data row.
        row: usize,
        /// Column header.
        column: String,
        /// Cell content.
        value: String,
    },
}

/// CSV writer settings.
///
/// # Examples
///
/// ```
/// use cn_resource_optimizer::prelude::*;
/// use cn_resource_optimizer::table::CsvExport;
///
/// let evaluator = Evaluator::cybernations();
/// let config = RankConfig::default()
///     .with_pool(["Coal", "Iron", "Gold"])
///     .with_subset_size(2);
/// let table = Ranker::rank(&evaluator, &WeightVector::dashboard(), &config);
///
/// let mut out = Vec::new();
/// CsvExport::default().with_limit(2).write(&table, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.lines().count(), 3); // header + 2 rows
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvExport {
    /// Fixed number of decimals for numeric cells. `None` writes the
    /// shortest representation that parses back to the same value.
    pub precision: Option<usize>,

    /// Maximum number of rows to write. `None` writes the whole table.
    pub limit: Option<usize>,
}

impl CsvExport {
    /// Sets a fixed decimal precision.
    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    /// Writes only the first `n` rows.
    pub fn with_limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Header row.
    pub fn headers() -> Vec<&'static str> {
        let mut headers = Vec::with_capacity(Effect::COUNT + 3);
        headers.push(MEMBERS);
        headers.extend(Effect::ALL.iter().map(|e| e.key()));
        headers.push(SCORE);
        headers.push(BONUSES);
        headers
    }

    fn number(&self, value: f64) -> String {
        match self.precision {
            Some(digits) => format!("{value:.digits$}"),
            None => value.to_string(),
        }
    }

    /// Writes `table` as CSV.
    pub fn write<W: Write>(&self, table: &ResultTable, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(Self::headers())?;

        let rows = match self.limit {
            Some(n) => table.top(n),
            None => table.as_slice(),
        };
        for result in rows {
            let mut record = Vec::with_capacity(Effect::COUNT + 3);
            record.push(result.members().join(NAME_SEPARATOR));
            record.extend(Effect::ALL.iter().map(|&e| self.number(result.total(e))));
            record.push(self.number(result.score()));
            record.push(result.bonuses().join(NAME_SEPARATOR));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes `table` to a file, replacing it if present.
    pub fn write_path<P: AsRef<Path>>(&self, table: &ResultTable, path: P) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.write(table, file)
    }
}

/// One row read back from an exported table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// Member names, in the order written.
    pub members: Vec<String>,
    /// Base totals.
    pub totals: EffectVector,
    /// Total score.
    pub score: f64,
    /// Unlocked bonus names, in the order written.
    pub bonuses: Vec<String>,
}

fn split_names(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a table written by [`CsvExport::write`].
///
/// Columns are located by header, so column order does not matter. Effect
/// columns that are absent read as zero; `members`, `score` and `bonuses`
/// are required.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ExportRow>, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &str| column(name).ok_or_else(|| ExportError::MissingColumn(name.to_string()));

    let members_col = required(MEMBERS)?;
    let score_col = required(SCORE)?;
    let bonuses_col = required(BONUSES)?;
    let effect_cols: Vec<(Effect, usize)> = Effect::ALL
        .iter()
        .filter_map(|&e| column(e.key()).map(|c| (e, c)))
        .collect();

    let mut rows = Vec::new();
    for (n, record) in csv_reader.records().enumerate() {
        let record = record?;
        let cell = |c: usize| record.get(c).unwrap_or("");
        let parse = |c: usize| -> Result<f64, ExportError> {
            let value = cell(c);
            value.parse::<f64>().map_err(|_| ExportError::InvalidNumber {
                row: n + 1,
                column: headers.get(c).unwrap_or("").to_string(),
                value: value.to_string(),
            })
        };

        let mut totals = EffectVector::new();
        for &(effect, c) in &effect_cols {
            totals = totals.with(effect, parse(c)?);
        }

        rows.push(ExportRow {
            members: split_names(cell(members_col)),
            totals,
            score: parse(score_col)?,
            bonuses: split_names(cell(bonuses_col)),
        });
    }

    Ok(rows)
}

/// Reads an exported table from a file.
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<Vec<ExportRow>, ExportError> {
    read_csv(File::open(path)?)
}
