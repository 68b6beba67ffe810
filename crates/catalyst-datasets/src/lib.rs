//! Catalyst Datasets
//!
//! Typed loading of the files the reports consume:
//! - assessments, proposal scores and voting results (CSV)
//! - withdrawn proposals (CSV, `proposal_id` column)
//! - challenge maps, challenge exports and proposal exports (JSON)
//! - free-form entity tables that are echoed back with extra columns
//!
//! Loading is the only I/O here; every failure is a [`DatasetError`] that
//! names the offending file.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod challenges;
pub mod entities;
pub mod error;
pub mod loader;
pub mod records;
pub mod withdrawals;

// Re-exports for convenience
pub use challenges::ChallengeMap;
pub use entities::{EntityTable, PROPOSAL_ID_COLUMN};
pub use error::{DatasetError, DatasetResult};
pub use loader::{
    load_assessments, load_challenges, load_proposal_scores, load_proposals_json,
    load_voting_results, read_csv, read_csv_from, read_json, read_json_from,
};
pub use records::{
    AssessmentRow, ChallengeRef, ProposalScoreRow, VotingResultRow, APPROVAL_YES, STATUS_FUNDED,
};
pub use withdrawals::Withdrawals;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
