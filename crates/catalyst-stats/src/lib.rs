//! Catalyst Stats
//!
//! Challenge-level statistics over assessment, score and voting datasets,
//! optionally enriched with live campaign data.
//!
//! # Pipelines
//!
//! - [`criteria_score`]: criteria averages per challenge
//! - [`proposals_score`]: top-10% / top-20% cohort means and extrema
//! - [`health_check`]: review counts merged with live stage counts
//! - [`innovation_baseline`]: stage, proposer and funding totals per challenge
//! - [`challenge_specific_funded`] / [`fund_stats_funded`]: funded outcomes
//! - [`assign_challenges`]: challenge titles for free-form entity tables
//! - [`fund_stats`]: stage totals for a whole campaign group
//!
//! Every report is a [`Report`] whose CSV form has metrics as rows and
//! challenges as columns.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod pipelines;
pub mod report;
pub mod stages;
pub mod stats;

// Re-exports for convenience
pub use error::{PipelineError, PipelineResult};
pub use pipelines::assign::{assign_challenges, AssignmentOutcome};
pub use pipelines::baseline::{innovation_baseline, ProposalActivity};
pub use pipelines::criteria::criteria_score;
pub use pipelines::fund::{fund_stats, FundTotals};
pub use pipelines::funded::{
    challenge_specific_funded, fund_stats_funded, join_voting_results, FundedSummary, JoinedScore,
};
pub use pipelines::health::health_check;
pub use pipelines::proposals::proposals_score;
pub use pipelines::RemoteOptions;
pub use report::{Cell, Report};
pub use stages::{CampaignStages, StageCounts, DEFAULT_GOVERNANCE_STAGE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
