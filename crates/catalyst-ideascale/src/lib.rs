//! Catalyst IdeaScale client
//!
//! Thin, typed access to the IdeaScale REST API:
//! - [`IdeascaleClient`]: GET with a static token header, transport retries
//!   and exactly-200 success semantics
//! - [`fetch_all_pages`]: offset pagination terminated by a short page
//! - [`IdeascaleApi`]: campaign, campaign-ideas and campaign-group accessors
//!
//! # Example
//!
//! ```rust,ignore
//! use catalyst_ideascale::{ApiConfig, IdeascaleApi, IdeascaleClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::new("https://cardano.ideascale.com/a/rest", "token");
//! let client = IdeascaleClient::new(&config)?;
//!
//! let campaign = client.get_campaign_by_id(25).await?;
//! let proposals = client.get_proposals_by_campaign_id(25).await?;
//! println!("{}: {} proposals", campaign.title, proposals.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;

// Re-exports for convenience
pub use api::IdeascaleApi;
pub use client::IdeascaleClient;
pub use config::{ApiConfig, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_SIZE};
pub use error::{ApiError, ApiResult};
pub use models::{
    Campaign, CampaignGroup, CampaignId, Contributor, CustomFields, Proposal, ProposalId,
    StageStatistic,
};
pub use pagination::fetch_all_pages;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
