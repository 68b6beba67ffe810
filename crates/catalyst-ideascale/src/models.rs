//! Remote documents returned by the IdeaScale API
//!
//! Only the fields the reports consume are modelled; everything else in the
//! payload is ignored during deserialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Campaign identifier on the ideation platform
pub type CampaignId = i64;

/// Proposal (idea) identifier on the ideation platform
pub type ProposalId = i64;

/// A funding category ("challenge" in the local datasets)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign id
    pub id: CampaignId,
    /// Title, when the payload carries one
    #[serde(default)]
    pub title: Option<String>,
    /// Name, sent instead of (or alongside) the title by some endpoints
    #[serde(default)]
    pub name: Option<String>,
    /// Number of comments across the campaign
    #[serde(default)]
    pub comment_count: u64,
    /// Idea counts per stage
    #[serde(default)]
    pub stage_statistics: Vec<StageStatistic>,
}

impl Campaign {
    /// Title if present, else the name, else empty
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// Number of ideas currently sitting in one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageStatistic {
    /// Free-text stage label
    pub label: String,
    /// Ideas in the stage
    #[serde(default)]
    pub idea_count: u64,
}

impl StageStatistic {
    /// Create a stage statistic
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, idea_count: u64) -> Self {
        Self {
            label: label.into(),
            idea_count,
        }
    }
}

/// A submission under a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Proposal id
    pub id: ProposalId,
    /// Proposal title
    #[serde(default)]
    pub title: String,
    /// Author member id
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Stage the proposal currently occupies
    #[serde(default)]
    pub stage_label: String,
    /// Owning campaign, as reported by the ideas endpoint
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    /// Owning campaign, as reported by exported proposal documents
    #[serde(default)]
    pub category: Option<CampaignId>,
    /// Custom form fields
    #[serde(default)]
    pub custom_fields_by_key: CustomFields,
    /// Co-proposers
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

impl Proposal {
    /// Requested funds, if present and numeric
    #[inline]
    #[must_use]
    pub fn requested_funds(&self) -> Option<u64> {
        self.custom_fields_by_key.requested_funds()
    }
}

/// Custom fields attached to a proposal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFields {
    /// Raw requested funds value; the platform sends numbers or strings
    #[serde(default)]
    pub requested_funds: Option<Value>,
}

impl CustomFields {
    /// Parse requested funds from either a JSON number or a numeric string
    #[must_use]
    pub fn requested_funds(&self) -> Option<u64> {
        match self.requested_funds.as_ref()? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(float_to_u64)),
            Value::String(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                cleaned
                    .parse::<u64>()
                    .ok()
                    .or_else(|| cleaned.parse::<f64>().ok().and_then(float_to_u64))
            }
            _ => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_u64(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

/// A proposal contributor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Member id
    pub id: i64,
}

/// Element of the campaign-group listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignGroup {
    /// Campaigns in the group
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}
