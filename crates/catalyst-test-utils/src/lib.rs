//! Testing utilities for the catalyst dashboard workspace
//!
//! Shared fixtures and a mock of the platform API.

#![allow(missing_docs)]

use async_trait::async_trait;
use catalyst_datasets::{ChallengeMap, ChallengeRef, Withdrawals};
use catalyst_ideascale::{
    ApiError, ApiResult, Campaign, CampaignGroup, CampaignId, Contributor, CustomFields,
    IdeascaleApi, Proposal, ProposalId, StageStatistic,
};
use mockall::mock;
use serde_json::Value;

mock! {
    pub Ideascale {}

    #[async_trait]
    impl IdeascaleApi for Ideascale {
        async fn get_campaign_by_id(&self, id: CampaignId) -> ApiResult<Campaign>;
        async fn get_proposals_by_campaign_id(&self, id: CampaignId) -> ApiResult<Vec<Proposal>>;
        async fn get_campaigns_by_group(&self, group_id: i64) -> ApiResult<Vec<CampaignGroup>>;
    }
}

pub fn campaign(id: CampaignId, title: &str, comments: u64, stages: &[(&str, u64)]) -> Campaign {
    Campaign {
        id,
        title: Some(title.to_string()),
        name: None,
        comment_count: comments,
        stage_statistics: stages
            .iter()
            .map(|(label, count)| StageStatistic::new(*label, *count))
            .collect(),
    }
}

/// Campaign with the three stages the reports read
pub fn campaign_with_stages(
    id: CampaignId,
    title: &str,
    insights: u64,
    archived: u64,
    governance: u64,
) -> Campaign {
    campaign(
        id,
        title,
        0,
        &[
            ("Insight sharing reserve", insights),
            ("Archive", archived),
            ("Assess QA", governance),
        ],
    )
}

pub fn proposal(id: ProposalId, author_id: i64, stage_label: &str) -> Proposal {
    Proposal {
        id,
        title: format!("Proposal {id}"),
        author_id: Some(author_id),
        stage_label: stage_label.to_string(),
        campaign_id: None,
        category: None,
        custom_fields_by_key: CustomFields::default(),
        contributors: Vec::new(),
    }
}

pub fn funded_proposal(
    id: ProposalId,
    author_id: i64,
    stage_label: &str,
    requested_funds: u64,
    contributors: &[i64],
) -> Proposal {
    let mut p = proposal(id, author_id, stage_label);
    p.custom_fields_by_key.requested_funds = Some(Value::from(requested_funds));
    p.contributors = contributors.iter().map(|id| Contributor { id: *id }).collect();
    p
}

pub fn categorized_proposal(id: ProposalId, category: CampaignId) -> Proposal {
    let mut p = proposal(id, 1, "Assess QA");
    p.category = Some(category);
    p
}

pub fn challenge_map(entries: &[(&str, CampaignId)]) -> ChallengeMap {
    entries
        .iter()
        .map(|(title, id)| ChallengeRef::new(*title, *id))
        .collect()
}

pub fn withdrawals(ids: &[ProposalId]) -> Withdrawals {
    ids.iter().copied().collect()
}

pub fn remote_failure(status: u16, endpoint: &str) -> ApiError {
    ApiError::RemoteRequestFailed {
        status,
        url: format!("https://ideascale.test{endpoint}"),
    }
}
