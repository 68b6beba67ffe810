//! Challenge assignment for free-form entity tables
//!
//! Each row's proposal is looked up in a proposals export, its category
//! resolved to a challenge title, and the title written to the
//! `Challenge` column.

use super::CHALLENGE_COLUMN;
use catalyst_datasets::{ChallengeMap, EntityTable};
use catalyst_ideascale::{Proposal, ProposalId};
use std::collections::HashMap;
use tracing::{info, warn};

/// Resolution counts for one assignment run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentOutcome {
    /// Rows that received a challenge title
    pub assigned: usize,
    /// Rows whose proposal id is missing, malformed or unknown
    pub unknown_proposal: usize,
    /// Rows whose proposal category is not a known challenge
    pub unknown_challenge: usize,
}

/// Set the `Challenge` column of every row
///
/// Unresolved rows get a blank title. The proposal's `category` is used,
/// falling back to its `campaignId`.
pub fn assign_challenges(
    entities: &mut EntityTable,
    proposals: &[Proposal],
    challenges: &ChallengeMap,
) -> AssignmentOutcome {
    let mut by_id: HashMap<ProposalId, &Proposal> = HashMap::with_capacity(proposals.len());
    for proposal in proposals {
        by_id.entry(proposal.id).or_insert(proposal);
    }

    let mut outcome = AssignmentOutcome::default();
    let mut titles = Vec::with_capacity(entities.len());

    for row in 0..entities.len() {
        let Some(proposal) = entities.proposal_id(row).and_then(|id| by_id.get(&id)) else {
            warn!(row, proposal_id = ?entities.proposal_id(row), "proposal not found");
            outcome.unknown_proposal += 1;
            titles.push(String::new());
            continue;
        };

        let category = proposal.category.or(proposal.campaign_id);
        match category.and_then(|id| challenges.title_for(id)) {
            Some(title) => {
                outcome.assigned += 1;
                titles.push(title.to_string());
            }
            None => {
                warn!(row, proposal_id = proposal.id, ?category, "challenge not found");
                outcome.unknown_challenge += 1;
                titles.push(String::new());
            }
        }
    }

    entities.set_column(CHALLENGE_COLUMN, titles);
    info!(
        assigned = outcome.assigned,
        unknown_proposal = outcome.unknown_proposal,
        unknown_challenge = outcome.unknown_challenge,
        "challenges assigned"
    );
    outcome
}
