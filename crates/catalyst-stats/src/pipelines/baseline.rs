//! Innovation baseline
//!
//! For every mapped challenge, in map order: stage totals from the campaign
//! plus proposer and funding figures over the proposals that sit in the
//! governance stage.

use super::RemoteOptions;
use crate::error::{PipelineError, PipelineResult};
use crate::report::{Cell, Report};
use crate::stages::CampaignStages;
use catalyst_datasets::{ChallengeMap, ChallengeRef, Withdrawals};
use catalyst_ideascale::{Campaign, IdeascaleApi, Proposal};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Insight-sharing submissions
pub const INSIGHTS_TOTAL: &str = "Insights (total)";
/// Archived plus governance-stage ideas
pub const IDEAS_TOTAL: &str = "Ideas (total)";
/// Archived ideas
pub const IDEAS_ARCHIVED: &str = "Ideas (archived)";
/// Governance-stage ideas
pub const PROPOSALS_VOTING: &str = "Proposals (voting app)";
/// Distinct authors of active proposals
pub const PROPOSERS: &str = "Proposers (unique)";
/// Distinct contributors who are not authors
pub const CO_PROPOSERS: &str = "Co-proposers (unique)";
/// Distinct authors and contributors
pub const ALL_PROPOSERS: &str = "Proposers + Co-proposers (unique)";
/// Requested funds of active proposals
pub const TOTAL_ASK: &str = "Total Ask (voting app)";

/// Proposer and funding figures over the active proposals of a challenge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalActivity {
    /// Proposals in the governance stage
    pub active: u64,
    /// Sum of requested funds
    pub total_ask: u64,
    /// Distinct author ids
    pub proposers: BTreeSet<i64>,
    /// Distinct contributor ids that never author an active proposal
    pub co_proposers: BTreeSet<i64>,
}

impl ProposalActivity {
    /// Tally the proposals that sit in `governance_stage`
    ///
    /// A missing or non-numeric requested-funds field counts as 0.
    #[must_use]
    pub fn from_proposals<'a>(
        proposals: impl IntoIterator<Item = &'a Proposal>,
        governance_stage: &str,
    ) -> Self {
        let mut activity = Self::default();
        let mut contributors = BTreeSet::new();

        for proposal in proposals {
            if proposal.stage_label != governance_stage {
                continue;
            }
            activity.active += 1;
            activity.total_ask += proposal.requested_funds().unwrap_or_else(|| {
                warn!(proposal_id = proposal.id, "requested funds missing, counting 0");
                0
            });
            if let Some(author) = proposal.author_id {
                activity.proposers.insert(author);
            }
            contributors.extend(proposal.contributors.iter().map(|c| c.id));
        }

        activity.co_proposers = contributors
            .difference(&activity.proposers)
            .copied()
            .collect();
        activity
    }

    /// Distinct authors and contributors
    #[must_use]
    pub fn all_proposers(&self) -> usize {
        self.proposers.union(&self.co_proposers).count()
    }
}

/// Build the innovation baseline report
///
/// # Errors
/// The first failed campaign or proposal fetch aborts the report.
pub async fn innovation_baseline(
    api: &dyn IdeascaleApi,
    challenges: &ChallengeMap,
    withdrawals: &Withdrawals,
    options: &RemoteOptions,
) -> PipelineResult<Report> {
    let fetched: Vec<(&ChallengeRef, Campaign, Vec<Proposal>)> = stream::iter(challenges.iter())
        .map(|challenge| async move {
            info!(challenge = %challenge.title, campaign_id = challenge.id, "requesting challenge");
            let campaign = api.get_campaign_by_id(challenge.id).await?;
            let proposals = api.get_proposals_by_campaign_id(challenge.id).await?;
            info!(challenge = %challenge.title, proposals = proposals.len(), "proposals fetched");
            Ok::<_, PipelineError>((challenge, campaign, proposals))
        })
        .buffered(options.effective_concurrency())
        .try_collect()
        .await?;

    let mut report = Report::new(&[
        INSIGHTS_TOTAL,
        IDEAS_TOTAL,
        IDEAS_ARCHIVED,
        PROPOSALS_VOTING,
        PROPOSERS,
        CO_PROPOSERS,
        ALL_PROPOSERS,
        TOTAL_ASK,
    ]);

    for (challenge, campaign, proposals) in fetched {
        let stages = CampaignStages::from_campaign(&campaign, &options.governance_stage);
        let proposals = withdrawals.exclude(&proposals, |p| p.id);
        let activity =
            ProposalActivity::from_proposals(proposals.iter().copied(), &options.governance_stage);
        info!(challenge = %challenge.title, active = activity.active, "active proposals");

        report.insert(
            challenge.title.clone(),
            vec![
                Cell::Count(stages.insights),
                Cell::Count(stages.ideas()),
                Cell::Count(stages.archived),
                Cell::Count(stages.governance),
                Cell::Count(activity.proposers.len() as u64),
                Cell::Count(activity.co_proposers.len() as u64),
                Cell::Count(activity.all_proposers() as u64),
                Cell::Count(activity.total_ask),
            ],
        );
    }
    Ok(report)
}
