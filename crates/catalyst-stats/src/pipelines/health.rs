//! Challenge health check
//!
//! Local review counts and top-10% ratings merged with live stage counts
//! for every assessed challenge that resolves through the challenge map.

use super::proposals::{ratings_by_challenge, TOP_10, TOP_10_FRACTION};
use super::RemoteOptions;
use crate::error::{PipelineError, PipelineResult};
use crate::report::{Cell, Report};
use crate::stages::CampaignStages;
use crate::stats::{count, group_by, round2, top_cohort_mean};
use catalyst_datasets::{AssessmentRow, ChallengeMap, ProposalScoreRow, Withdrawals};
use catalyst_ideascale::{CampaignId, IdeascaleApi};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{info, warn};

/// Assessments with an impact rating
pub const CA_REVIEWS: &str = "CA Reviews (valid)";
/// Insight-sharing submissions
pub const INSIGHTS: &str = "Insights";
/// Archived plus governance-stage ideas
pub const IDEAS: &str = "Ideas";
/// Governance-stage ideas
pub const PROPOSALS: &str = "Proposals";
/// Campaign comments
pub const COMMENTS: &str = "Comments";

struct LocalRow {
    challenge: String,
    campaign_id: CampaignId,
    reviews: u64,
    top_10: Option<f64>,
}

/// Build the health-check report
///
/// # Errors
/// The first failed campaign fetch aborts the report.
pub async fn health_check(
    api: &dyn IdeascaleApi,
    assessments: &[AssessmentRow],
    scores: &[ProposalScoreRow],
    challenges: &ChallengeMap,
    withdrawals: &Withdrawals,
    options: &RemoteOptions,
) -> PipelineResult<Report> {
    let assessments = withdrawals.exclude(assessments, |row| row.proposal_id);
    let scores = withdrawals.exclude(scores, |row| row.proposal_id);
    let ratings = ratings_by_challenge(&scores);

    let mut local = Vec::new();
    for (challenge, rows) in group_by(assessments, |row| row.challenge.clone()) {
        let Some(campaign_id) = challenges.resolve(&challenge) else {
            warn!(challenge = %challenge, "challenge not in map, skipping");
            continue;
        };
        let reviews = count(rows.iter().map(|r| r.impact));
        let top_10 = ratings
            .get(&challenge)
            .and_then(|r| top_cohort_mean(r, TOP_10_FRACTION))
            .map(round2);
        local.push(LocalRow {
            challenge,
            campaign_id,
            reviews,
            top_10,
        });
    }

    let fetched: Vec<_> = stream::iter(local)
        .map(|row| async move {
            info!(
                challenge = %row.challenge,
                campaign_id = row.campaign_id,
                "requesting challenge"
            );
            let campaign = api.get_campaign_by_id(row.campaign_id).await?;
            Ok::<_, PipelineError>((row, campaign))
        })
        .buffered(options.effective_concurrency())
        .try_collect()
        .await?;

    let mut report = Report::new(&[CA_REVIEWS, INSIGHTS, IDEAS, PROPOSALS, COMMENTS, TOP_10]);
    for (row, campaign) in fetched {
        let stages = CampaignStages::from_campaign(&campaign, &options.governance_stage);
        report.insert(
            row.challenge,
            vec![
                Cell::Count(row.reviews),
                Cell::Count(stages.insights),
                Cell::Count(stages.ideas()),
                Cell::Count(stages.governance),
                Cell::Count(campaign.comment_count),
                Cell::value(row.top_10),
            ],
        );
    }
    Ok(report)
}
