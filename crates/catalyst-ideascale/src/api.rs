//! Resource accessors
//!
//! [`IdeascaleApi`] is the seam the reporting pipelines depend on; the
//! HTTP-backed [`IdeascaleClient`] is the production implementation.

use crate::client::IdeascaleClient;
use crate::error::ApiResult;
use crate::models::{Campaign, CampaignGroup, CampaignId, Proposal};
use async_trait::async_trait;

/// Endpoint for a single campaign
#[must_use]
pub fn campaign_endpoint(id: CampaignId) -> String {
    format!("/v1/campaign/{id}")
}

/// Endpoint for one page of a campaign's ideas
#[must_use]
pub fn campaign_ideas_endpoint(id: CampaignId, page: usize, page_size: usize) -> String {
    format!("/v1/campaigns/{id}/ideas/{page}/{page_size}")
}

/// Endpoint for a campaign group listing
#[must_use]
pub fn campaign_group_endpoint(group_id: i64) -> String {
    format!("/v1/campaigns/groups/{group_id}")
}

/// Read-only access to the ideation platform
#[async_trait]
pub trait IdeascaleApi: Send + Sync {
    /// Fetch one campaign with its stage statistics
    async fn get_campaign_by_id(&self, id: CampaignId) -> ApiResult<Campaign>;

    /// Fetch every proposal of a campaign, across all pages
    async fn get_proposals_by_campaign_id(&self, id: CampaignId) -> ApiResult<Vec<Proposal>>;

    /// Fetch a campaign group listing; the first element carries `campaigns`
    async fn get_campaigns_by_group(&self, group_id: i64) -> ApiResult<Vec<CampaignGroup>>;
}

#[async_trait]
impl IdeascaleApi for IdeascaleClient {
    async fn get_campaign_by_id(&self, id: CampaignId) -> ApiResult<Campaign> {
        self.get(&campaign_endpoint(id)).await
    }

    async fn get_proposals_by_campaign_id(&self, id: CampaignId) -> ApiResult<Vec<Proposal>> {
        self.get_all_pages(|page, page_size| campaign_ideas_endpoint(id, page, page_size))
            .await
    }

    async fn get_campaigns_by_group(&self, group_id: i64) -> ApiResult<Vec<CampaignGroup>> {
        self.get(&campaign_group_endpoint(group_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_platform_routes() {
        assert_eq!(campaign_endpoint(25), "/v1/campaign/25");
        assert_eq!(campaign_ideas_endpoint(25, 2, 50), "/v1/campaigns/25/ideas/2/50");
        assert_eq!(campaign_group_endpoint(63), "/v1/campaigns/groups/63");
    }
}
