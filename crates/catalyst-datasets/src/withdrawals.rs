//! Withdrawn proposals
//!
//! A global exclusion set applied before any aggregation.

use crate::error::DatasetResult;
use crate::loader::{open, read_csv_from};
use catalyst_ideascale::ProposalId;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct WithdrawalRow {
    proposal_id: ProposalId,
}

/// Set of proposal ids excluded from every report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Withdrawals {
    ids: HashSet<ProposalId>,
}

impl Withdrawals {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Load the `proposal_id` column of a withdrawals CSV
    ///
    /// # Errors
    /// `DatasetError::Io` or `DatasetError::Csv` (including a missing
    /// `proposal_id` column)
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        Self::from_reader(open(path)?, path)
    }

    /// Parse a withdrawals CSV from a reader
    ///
    /// # Errors
    /// See [`Withdrawals::load`]
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> DatasetResult<Self> {
        let rows: Vec<WithdrawalRow> = read_csv_from(reader, origin)?;
        Ok(rows.into_iter().map(|r| r.proposal_id).collect())
    }

    /// Check if a proposal was withdrawn
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ProposalId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of withdrawn proposals
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing was withdrawn
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep only items whose proposal id was not withdrawn
    pub fn exclude<T>(
        &self,
        items: impl IntoIterator<Item = T>,
        id: impl Fn(&T) -> ProposalId,
    ) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| !self.contains(id(item)))
            .collect()
    }
}

impl FromIterator<ProposalId> for Withdrawals {
    fn from_iter<I: IntoIterator<Item = ProposalId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
