//! Row types for the tabular inputs
//!
//! Column names follow the exported spreadsheets; unknown columns are ignored.

use catalyst_ideascale::{CampaignId, ProposalId};
use serde::{Deserialize, Serialize};

/// One community-advisor assessment of a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRow {
    /// Assessed proposal
    pub proposal_id: ProposalId,
    /// Proposal title
    #[serde(rename = "Idea Title", default)]
    pub idea_title: String,
    /// Challenge title
    #[serde(rename = "Challenge")]
    pub challenge: String,
    /// Impact / alignment rating
    #[serde(rename = "Impact / Alignment Rating", alias = "Impact/Alignment Rating")]
    pub impact: Option<f64>,
    /// Feasibility rating
    #[serde(rename = "Feasibility Rating")]
    pub feasibility: Option<f64>,
    /// Auditability rating
    #[serde(rename = "Auditability Rating")]
    pub auditability: Option<f64>,
}

impl AssessmentRow {
    /// Create a fully rated assessment
    #[must_use]
    pub fn new(
        proposal_id: ProposalId,
        challenge: impl Into<String>,
        impact: f64,
        feasibility: f64,
        auditability: f64,
    ) -> Self {
        Self {
            proposal_id,
            idea_title: String::new(),
            challenge: challenge.into(),
            impact: Some(impact),
            feasibility: Some(feasibility),
            auditability: Some(auditability),
        }
    }

    /// With proposal title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.idea_title = title.into();
        self
    }

    /// Mean of the ratings that are present; `None` if none are
    #[must_use]
    pub fn final_rating(&self) -> Option<f64> {
        let ratings: Vec<f64> = [self.impact, self.feasibility, self.auditability]
            .into_iter()
            .flatten()
            .collect();
        if ratings.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        }
    }
}

/// Community rating given to a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalScoreRow {
    /// Rated proposal
    pub proposal_id: ProposalId,
    /// Challenge title
    #[serde(rename = "Challenge")]
    pub challenge: String,
    /// Aggregated rating
    #[serde(rename = "Rating Given")]
    pub rating_given: Option<f64>,
}

impl ProposalScoreRow {
    /// Create a rated proposal row
    #[must_use]
    pub fn new(proposal_id: ProposalId, challenge: impl Into<String>, rating: f64) -> Self {
        Self {
            proposal_id,
            challenge: challenge.into(),
            rating_given: Some(rating),
        }
    }
}

/// Status value marking a funded proposal
pub const STATUS_FUNDED: &str = "FUNDED";

/// Threshold value marking an approved proposal
pub const APPROVAL_YES: &str = "YES";

/// On-chain voting outcome for one proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingResultRow {
    /// Platform proposal id (joins with `proposal_id` of local rows);
    /// blank in rows that never match
    #[serde(default)]
    pub internal_id: Option<ProposalId>,
    /// On-chain proposal identifier
    #[serde(rename = "proposal_id", default)]
    pub chain_proposal_id: String,
    /// Outcome status, e.g. `FUNDED`
    #[serde(default)]
    pub status: String,
    /// `YES` when the approval threshold was met
    #[serde(default)]
    pub meets_approval_threshold: String,
}

impl VotingResultRow {
    /// Create a voting result row
    #[must_use]
    pub fn new(
        internal_id: ProposalId,
        status: impl Into<String>,
        meets_approval_threshold: impl Into<String>,
    ) -> Self {
        Self {
            internal_id: Some(internal_id),
            chain_proposal_id: String::new(),
            status: status.into(),
            meets_approval_threshold: meets_approval_threshold.into(),
        }
    }

    /// Check if the proposal was funded
    #[inline]
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.status == STATUS_FUNDED
    }

    /// Check if the proposal met the approval threshold
    #[inline]
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.meets_approval_threshold == APPROVAL_YES
    }
}

/// `{title, id}` pair linking a local challenge title to a remote campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRef {
    /// Challenge title as written in the local datasets
    pub title: String,
    /// Campaign id on the platform
    pub id: CampaignId,
}

impl ChallengeRef {
    /// Create a challenge reference
    #[must_use]
    pub fn new(title: impl Into<String>, id: CampaignId) -> Self {
        Self {
            title: title.into(),
            id,
        }
    }
}
