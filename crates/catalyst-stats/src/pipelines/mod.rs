//! Reporting pipelines
//!
//! Each pipeline is a function of already-loaded inputs. The remote ones
//! take a `&dyn IdeascaleApi` and fan out one request per challenge, at
//! most [`RemoteOptions::concurrency`] at a time, in challenge order.
//!
//! Withdrawn proposals are removed before any grouping.

pub mod assign;
pub mod baseline;
pub mod criteria;
pub mod fund;
pub mod funded;
pub mod health;
pub mod proposals;

use crate::stages::DEFAULT_GOVERNANCE_STAGE;

/// Challenge title column shared by the local datasets
pub const CHALLENGE_COLUMN: &str = "Challenge";

/// Settings for pipelines that call the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOptions {
    /// Stage label counted as the governance (voting) stage
    pub governance_stage: String,
    /// Per-challenge requests in flight
    pub concurrency: usize,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            governance_stage: DEFAULT_GOVERNANCE_STAGE.to_string(),
            concurrency: 1,
        }
    }
}

impl RemoteOptions {
    /// With governance stage label
    #[inline]
    #[must_use]
    pub fn with_governance_stage(mut self, label: impl Into<String>) -> Self {
        self.governance_stage = label.into();
        self
    }

    /// With per-challenge concurrency
    #[inline]
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Concurrency, never below 1
    #[inline]
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
