//! Stage-statistic resolution
//!
//! A campaign reports idea counts as a list of `(label, ideaCount)` pairs.
//! Counts are resolved through one pass into a label map:
//! - a label that never appears counts as 0
//! - a label that appears more than once keeps its last value

use catalyst_ideascale::{Campaign, StageStatistic};
use std::collections::HashMap;
use tracing::warn;

/// Stage holding insight-sharing submissions
pub const INSIGHT_SHARING_STAGE: &str = "Insight sharing reserve";

/// Stage holding archived ideas
pub const ARCHIVE_STAGE: &str = "Archive";

/// Default label of the governance stage
pub const DEFAULT_GOVERNANCE_STAGE: &str = "Assess QA";

/// Idea counts keyed by stage label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageCounts {
    counts: HashMap<String, u64>,
    duplicates: Vec<String>,
}

impl StageCounts {
    /// Build the label map, last write wins
    #[must_use]
    pub fn from_statistics(statistics: &[StageStatistic]) -> Self {
        let mut counts = HashMap::with_capacity(statistics.len());
        let mut duplicates = Vec::new();
        for stat in statistics {
            if counts.insert(stat.label.clone(), stat.idea_count).is_some()
                && !duplicates.contains(&stat.label)
            {
                duplicates.push(stat.label.clone());
            }
        }
        Self { counts, duplicates }
    }

    /// Idea count for a label, 0 if absent
    #[inline]
    #[must_use]
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Check if a label was reported at all
    #[inline]
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.counts.contains_key(label)
    }

    /// Labels reported more than once
    #[inline]
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

/// The three stage buckets the reports care about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignStages {
    /// Ideas in the insight-sharing reserve
    pub insights: u64,
    /// Archived ideas
    pub archived: u64,
    /// Ideas in the governance stage
    pub governance: u64,
}

impl CampaignStages {
    /// Resolve the buckets of one campaign
    #[must_use]
    pub fn from_campaign(campaign: &Campaign, governance_stage: &str) -> Self {
        let counts = StageCounts::from_statistics(&campaign.stage_statistics);

        for label in counts.duplicates() {
            warn!(
                campaign_id = campaign.id,
                label = %label,
                "duplicate stage label, keeping the last count"
            );
        }
        for label in [INSIGHT_SHARING_STAGE, ARCHIVE_STAGE, governance_stage] {
            if !counts.contains(label) {
                warn!(campaign_id = campaign.id, label, "stage label missing, counting 0");
            }
        }

        Self {
            insights: counts.count(INSIGHT_SHARING_STAGE),
            archived: counts.count(ARCHIVE_STAGE),
            governance: counts.count(governance_stage),
        }
    }

    /// Total ideas: archived plus governance stage
    #[inline]
    #[must_use]
    pub fn ideas(&self) -> u64 {
        self.archived + self.governance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(stats: Vec<StageStatistic>) -> Campaign {
        Campaign {
            id: 1,
            title: Some("A".into()),
            name: None,
            comment_count: 0,
            stage_statistics: stats,
        }
    }

    #[test]
    fn resolves_known_labels() {
        let c = campaign(vec![
            StageStatistic::new("Insight sharing reserve", 7),
            StageStatistic::new("Archive", 3),
            StageStatistic::new("Assess QA", 20),
            StageStatistic::new("Draft", 99),
        ]);
        let stages = CampaignStages::from_campaign(&c, DEFAULT_GOVERNANCE_STAGE);

        assert_eq!(stages.insights, 7);
        assert_eq!(stages.archived, 3);
        assert_eq!(stages.governance, 20);
        assert_eq!(stages.ideas(), 23);
    }

    #[test]
    fn missing_label_counts_zero() {
        let c = campaign(vec![StageStatistic::new("Archive", 3)]);
        let stages = CampaignStages::from_campaign(&c, "Governance phase");

        assert_eq!(stages.insights, 0);
        assert_eq!(stages.governance, 0);
        assert_eq!(stages.ideas(), 3);
    }

    #[test]
    fn duplicate_label_last_write_wins() {
        let counts = StageCounts::from_statistics(&[
            StageStatistic::new("Archive", 3),
            StageStatistic::new("Archive", 5),
            StageStatistic::new("Archive", 4),
        ]);
        assert_eq!(counts.count("Archive"), 4);
        assert_eq!(counts.duplicates(), &["Archive".to_string()]);
    }

    #[test]
    fn governance_label_is_configurable() {
        let c = campaign(vec![
            StageStatistic::new("Assess QA", 10),
            StageStatistic::new("Governance phase", 12),
        ]);
        assert_eq!(CampaignStages::from_campaign(&c, "Governance phase").governance, 12);
        assert_eq!(CampaignStages::from_campaign(&c, "Assess QA").governance, 10);
    }
}
