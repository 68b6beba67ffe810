//! Free-form entity table
//!
//! Used when the report must echo the input back with extra columns. Cells
//! are kept as text; only the `proposal_id` column is interpreted.

use crate::error::{DatasetError, DatasetResult};
use crate::loader::open;
use catalyst_ideascale::ProposalId;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Column identifying the proposal of each entity row
pub const PROPOSAL_ID_COLUMN: &str = "proposal_id";

/// Headed table of text cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTable {
    /// Column names
    pub headers: Vec<String>,
    /// Rows, each with one cell per header
    pub rows: Vec<Vec<String>>,
    proposal_column: usize,
}

impl EntityTable {
    /// Load an entity CSV
    ///
    /// # Errors
    /// `DatasetError::Io`, `DatasetError::Csv`, or
    /// `DatasetError::MissingColumn` if there is no `proposal_id` column
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        Self::from_reader(open(path)?, path)
    }

    /// Parse an entity CSV from a reader
    ///
    /// # Errors
    /// See [`EntityTable::load`]
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> DatasetResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| DatasetError::csv_error(origin, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let proposal_column = headers
            .iter()
            .position(|h| h == PROPOSAL_ID_COLUMN)
            .ok_or_else(|| DatasetError::missing_column(origin, PROPOSAL_ID_COLUMN))?;

        let rows = csv_reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()
            .map_err(|e| DatasetError::csv_error(origin, e))?;

        Ok(Self {
            headers,
            rows,
            proposal_column,
        })
    }

    /// Proposal id of a row, if the cell is a valid integer
    #[must_use]
    pub fn proposal_id(&self, row: usize) -> Option<ProposalId> {
        let cell = self.rows.get(row)?.get(self.proposal_column)?.trim();
        cell.parse::<ProposalId>().ok().or_else(|| {
            // spreadsheet exports sometimes write integer ids as `12.0`
            cell.parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0)
                .map(|v| {
                    #[allow(clippy::cast_possible_truncation)]
                    let id = v as ProposalId;
                    id
                })
        })
    }

    /// Set a column, appending it if it does not exist yet
    ///
    /// `values` must have one entry per row; missing entries become blank.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        let index = match self.headers.iter().position(|h| h == name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.headers.len() - 1
            }
        };

        let mut values = values.into_iter();
        for row in &mut self.rows {
            if row.len() <= index {
                row.resize(index + 1, String::new());
            }
            row[index] = values.next().unwrap_or_default();
        }
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as CSV (no index column)
    ///
    /// # Errors
    /// `DatasetError::Csv` if writing fails
    pub fn write_csv<W: Write>(&self, writer: W, destination: &Path) -> DatasetResult<()> {
        let to_err = |e: csv::Error| DatasetError::csv_error(PathBuf::from(destination), e);
        let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        csv_writer.write_record(&self.headers).map_err(to_err)?;
        for row in &self.rows {
            csv_writer.write_record(row).map_err(to_err)?;
        }
        csv_writer
            .flush()
            .map_err(|e| DatasetError::io_error(destination, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(csv: &str) -> EntityTable {
        EntityTable::from_reader(csv.as_bytes(), Path::new("entities.csv")).unwrap()
    }

    #[test]
    fn appends_new_column() {
        let mut t = table("name,proposal_id\nalice,4\nbob,5\n");
        t.set_column("Challenge", vec!["A".into(), String::new()]);

        assert_eq!(t.headers, vec!["name", "proposal_id", "Challenge"]);
        assert_eq!(t.rows[0], vec!["alice", "4", "A"]);
        assert_eq!(t.rows[1], vec!["bob", "5", ""]);
    }

    #[test]
    fn overwrites_existing_column() {
        let mut t = table("proposal_id,Challenge\n4,old\n");
        t.set_column("Challenge", vec!["new".into()]);
        assert_eq!(t.rows[0], vec!["4", "new"]);
    }

    #[test]
    fn proposal_ids_tolerate_float_exports() {
        let t = table("proposal_id\n12\n13.0\nabc\n");
        assert_eq!(t.proposal_id(0), Some(12));
        assert_eq!(t.proposal_id(1), Some(13));
        assert_eq!(t.proposal_id(2), None);
    }

    #[test]
    fn requires_proposal_id_column() {
        let err = EntityTable::from_reader(&b"id\n1\n"[..], Path::new("e.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
    }

    #[test]
    fn writes_without_index() {
        let t = table("proposal_id,name\n1,x\n");
        let mut out = Vec::new();
        t.write_csv(&mut out, Path::new("out.csv")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "proposal_id,name\n1,x\n");
    }
}
