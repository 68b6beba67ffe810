//! Fund-wide stage totals for a campaign group

use crate::error::{PipelineError, PipelineResult};
use crate::stages::CampaignStages;
use catalyst_ideascale::{CampaignGroup, IdeascaleApi};
use std::fmt;
use tracing::info;

/// Stage totals summed over every campaign of a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundTotals {
    /// Archived plus active ideas
    pub submissions: u64,
    /// Archived ideas
    pub archived: u64,
    /// Insight-sharing submissions
    pub insights: u64,
    /// Ideas in the governance stage
    pub active: u64,
}

impl FundTotals {
    /// Sum the stage counts of a group document
    #[must_use]
    pub fn from_group(group: &CampaignGroup, governance_stage: &str) -> Self {
        let mut totals = Self::default();
        for campaign in &group.campaigns {
            let stages = CampaignStages::from_campaign(campaign, governance_stage);
            totals.active += stages.governance;
            totals.archived += stages.archived;
            totals.insights += stages.insights;
        }
        totals.submissions = totals.active + totals.archived;
        totals
    }
}

impl fmt::Display for FundTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total submissions: {}", self.submissions)?;
        writeln!(f, "Total archived: {}", self.archived)?;
        writeln!(f, "Total insights: {}", self.insights)?;
        write!(f, "Total active: {}", self.active)
    }
}

/// Fetch a campaign group and total its stage counts
///
/// # Errors
/// `PipelineError::EmptyCampaignGroup` if the listing has no group
/// document; API errors otherwise.
pub async fn fund_stats(
    api: &dyn IdeascaleApi,
    group_id: i64,
    governance_stage: &str,
) -> PipelineResult<FundTotals> {
    let groups = api.get_campaigns_by_group(group_id).await?;
    let group = groups
        .first()
        .ok_or(PipelineError::EmptyCampaignGroup(group_id))?;

    info!(group_id, campaigns = group.campaigns.len(), "campaign group fetched");
    Ok(FundTotals::from_group(group, governance_stage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalyst_test_utils::{campaign_with_stages, MockIdeascale};
    use mockall::predicate::eq;

    fn group() -> CampaignGroup {
        CampaignGroup {
            campaigns: vec![
                campaign_with_stages(1, "DApps", 3, 10, 40),
                campaign_with_stages(2, "Developer Ecosystem", 2, 5, 25),
            ],
        }
    }

    #[test]
    fn sums_across_campaigns() {
        let totals = FundTotals::from_group(&group(), "Assess QA");
        assert_eq!(
            totals,
            FundTotals {
                submissions: 80,
                archived: 15,
                insights: 5,
                active: 65,
            }
        );
        assert_eq!(
            totals.to_string(),
            "Total submissions: 80\nTotal archived: 15\nTotal insights: 5\nTotal active: 65"
        );
    }

    #[tokio::test]
    async fn empty_listing_is_an_error() {
        let mut api = MockIdeascale::new();
        api.expect_get_campaigns_by_group()
            .with(eq(63))
            .returning(|_| Ok(Vec::new()));

        let err = fund_stats(&api, 63, "Assess QA").await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCampaignGroup(63)));
    }

    #[tokio::test]
    async fn reads_first_group_only() {
        let mut api = MockIdeascale::new();
        api.expect_get_campaigns_by_group()
            .returning(|_| Ok(vec![group(), group()]));

        let totals = fund_stats(&api, 1, "Assess QA").await.unwrap();
        assert_eq!(totals.active, 65);
    }
}
