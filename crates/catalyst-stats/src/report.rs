//! Challenge-indexed report tables
//!
//! Pipelines build one row per challenge with one cell per metric. On disk
//! the table is transposed: metrics become rows and challenge titles become
//! columns.

use crate::error::{PipelineError, PipelineResult};
use indexmap::IndexMap;
use std::fmt;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// One report value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Integer count
    Count(u64),
    /// Two-decimal aggregate
    Value(f64),
    /// No value (empty group, missing data)
    Blank,
}

impl Cell {
    /// Value cell, or blank when absent
    #[inline]
    #[must_use]
    pub fn value(value: Option<f64>) -> Self {
        value.map_or(Self::Blank, Self::Value)
    }

    /// Numeric content, if any
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Count(n) => Some(*n as f64),
            Self::Value(v) => Some(*v),
            Self::Blank => None,
        }
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Count(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::Blank => Ok(()),
        }
    }
}

/// Metric × challenge table
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    metrics: Vec<String>,
    rows: IndexMap<String, Vec<Cell>>,
}

impl Report {
    /// Create an empty report with the given metric columns
    #[must_use]
    pub fn new(metrics: &[&str]) -> Self {
        Self {
            metrics: metrics.iter().map(|m| (*m).to_string()).collect(),
            rows: IndexMap::new(),
        }
    }

    /// Set the row of a challenge
    ///
    /// Rows keep insertion order; re-inserting a challenge replaces its
    /// cells in place. Short rows are padded with blanks.
    pub fn insert(&mut self, challenge: impl Into<String>, mut cells: Vec<Cell>) {
        cells.resize(self.metrics.len(), Cell::Blank);
        self.rows.insert(challenge.into(), cells);
    }

    /// Metric names in column order
    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    /// Challenge titles in row order
    pub fn challenges(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Cells of one challenge
    #[must_use]
    pub fn row(&self, challenge: &str) -> Option<&[Cell]> {
        self.rows.get(challenge).map(Vec::as_slice)
    }

    /// Single cell lookup
    #[must_use]
    pub fn get(&self, challenge: &str, metric: &str) -> Option<Cell> {
        let column = self.metrics.iter().position(|m| m == metric)?;
        self.rows.get(challenge).map(|cells| cells[column])
    }

    /// Number of challenges
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no challenge produced a row
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Transposed records: a header of challenge titles, then one record per metric
    #[must_use]
    pub fn transposed(&self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.metrics.len() + 1);

        let mut header = vec![String::new()];
        header.extend(self.rows.keys().cloned());
        records.push(header);

        for (column, metric) in self.metrics.iter().enumerate() {
            let mut record = vec![metric.clone()];
            record.extend(self.rows.values().map(|cells| cells[column].to_string()));
            records.push(record);
        }
        records
    }

    /// Write the transposed table as CSV
    ///
    /// # Errors
    /// Any error from the underlying writer
    pub fn write_csv_to<W: Write>(&self, writer: W) -> std::io::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in self.transposed() {
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()
    }

    /// Write the transposed table to `path`
    ///
    /// The file only appears once it is complete.
    ///
    /// # Errors
    /// `PipelineError::ReportWrite` if the file cannot be written
    pub fn write_csv(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        self.write_csv_to(&mut buffer)
            .map_err(|e| PipelineError::report_write(path, e))?;
        persist(path, &buffer)?;
        info!(path = %path.display(), challenges = self.len(), "report written");
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<(&String, Vec<String>)> = self
            .rows
            .iter()
            .map(|(challenge, cells)| (challenge, cells.iter().map(Cell::to_string).collect()))
            .collect();

        let title_width = rendered
            .iter()
            .map(|(c, _)| c.chars().count())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .metrics
            .iter()
            .enumerate()
            .map(|(i, m)| {
                rendered
                    .iter()
                    .map(|(_, cells)| cells[i].len())
                    .chain(std::iter::once(m.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:title_width$}", "")?;
        for (metric, width) in self.metrics.iter().zip(&widths) {
            write!(f, "  {metric:>width$}")?;
        }
        writeln!(f)?;

        for (challenge, cells) in &rendered {
            write!(f, "{challenge:title_width$}")?;
            for (cell, width) in cells.iter().zip(&widths) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory
///
/// # Errors
/// `PipelineError::ReportWrite` on any I/O failure; `path` is untouched
pub fn persist(path: &Path, bytes: &[u8]) -> PipelineResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir).map_err(|e| PipelineError::report_write(path, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| PipelineError::report_write(path, e))?;
    file.persist(path)
        .map_err(|e| PipelineError::report_write(path, e.error))?;
    Ok(())
}
