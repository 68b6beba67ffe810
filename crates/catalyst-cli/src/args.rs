//! Command line arguments
//!
//! Every API setting can also come from the environment (or a `.env` file
//! loaded before parsing).

use anyhow::{bail, Context, Result};
use catalyst_ideascale::{ApiConfig, DEFAULT_MAX_RETRIES};
use catalyst_stats::DEFAULT_GOVERNANCE_STAGE;
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Load a `.env` file into the environment
///
/// `None` searches the current directory and its parents. A missing file is
/// fine.
///
/// # Errors
/// If the file exists but cannot be read or parsed
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match loaded {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("failed to load .env"),
    }
}

/// Catalyst challenge statistics
#[derive(Debug, Parser)]
#[command(name = "catalyst-dashboard", version, about)]
pub struct Cli {
    /// Log level used when `RUST_LOG` is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// IdeaScale API settings
    #[command(flatten)]
    pub api: ApiArgs,

    /// Command group
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level command groups
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Challenge-level reports
    #[command(subcommand)]
    Challenges(ChallengeCommand),
}

/// Report commands
#[derive(Debug, Subcommand)]
pub enum ChallengeCommand {
    /// Criteria averages per challenge
    CriteriaScore {
        /// Valid assessments CSV
        #[arg(long)]
        input_file: PathBuf,
        /// Withdrawn proposals CSV
        #[arg(long)]
        withdrawals_file: Option<PathBuf>,
        /// Report CSV to write
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Cohort means and extrema of proposal ratings
    ProposalsScore {
        /// Proposal scores CSV
        #[arg(long)]
        input_file: PathBuf,
        /// Withdrawn proposals CSV
        #[arg(long)]
        withdrawals_file: Option<PathBuf>,
        /// Report CSV to write
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Review counts merged with live stage counts
    HealthCheck {
        /// Valid assessments CSV
        #[arg(long)]
        assessments_file: PathBuf,
        /// Proposal scores CSV
        #[arg(long)]
        proposals_file: PathBuf,
        /// Challenge map JSON (title, id)
        #[arg(long)]
        challenges_map: PathBuf,
        /// Withdrawn proposals CSV
        #[arg(long)]
        withdrawals_file: Option<PathBuf>,
        /// Report CSV to write
        #[arg(long)]
        output_file: PathBuf,
        /// Label of the governance stage
        #[arg(long, default_value = DEFAULT_GOVERNANCE_STAGE)]
        governance_stage: String,
    },

    /// Stage, proposer and funding totals per mapped challenge
    InnovationBaseline {
        /// Challenge map JSON (title, id)
        #[arg(long)]
        challenges_map: PathBuf,
        /// Withdrawn proposals CSV
        #[arg(long)]
        withdrawals_file: Option<PathBuf>,
        /// Report CSV to write
        #[arg(long)]
        output_file: PathBuf,
        /// Label of the governance stage
        #[arg(long, default_value = DEFAULT_GOVERNANCE_STAGE)]
        governance_stage: String,
    },

    /// Rating figures over funded proposals per challenge
    ChallengeSpecificFunded {
        /// Proposal scores CSV
        #[arg(long)]
        proposals_file: PathBuf,
        /// Merged voting results CSV
        #[arg(long)]
        voting_results: PathBuf,
        /// Withdrawn proposals CSV
        #[arg(long)]
        withdrawals_file: Option<PathBuf>,
        /// Report CSV to write
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Approved and funded proposal counts
    FundStatsFunded {
        /// Proposal scores CSV
        #[arg(long)]
        proposals_file: PathBuf,
        /// Merged voting results CSV
        #[arg(long)]
        voting_results: PathBuf,
        /// Withdrawn proposals CSV
        #[arg(long)]
        withdrawals_file: Option<PathBuf>,
        /// Title of the challenge-setting challenge
        #[arg(long, default_value = "")]
        challenge_setting_title: String,
    },

    /// Add a Challenge column to a table keyed by proposal_id
    AssignChallenges {
        /// Table to annotate (CSV with a proposal_id column)
        #[arg(long)]
        input_file: PathBuf,
        /// Proposals export JSON
        #[arg(long)]
        proposals_file: PathBuf,
        /// Challenges export JSON
        #[arg(long)]
        challenges_file: PathBuf,
        /// Annotated CSV to write
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Stage totals for a campaign group
    FundStats {
        /// Campaign group id
        #[arg(long)]
        group_id: i64,
        /// Label of the governance stage
        #[arg(long, default_value = DEFAULT_GOVERNANCE_STAGE)]
        governance_stage: String,
    },
}

impl ChallengeCommand {
    /// Check if the command talks to the platform
    #[must_use]
    pub fn needs_api(&self) -> bool {
        matches!(
            self,
            Self::HealthCheck { .. } | Self::InnovationBaseline { .. } | Self::FundStats { .. }
        )
    }
}

/// IdeaScale connection settings
#[derive(Clone, Args)]
pub struct ApiArgs {
    /// API base URL
    #[arg(long, env = "IDEASCALE_BASE_API_URL", global = true)]
    pub base_url: Option<String>,

    /// API token
    #[arg(long, env = "IDEASCALE_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds (waits forever when unset)
    #[arg(long, env = "IDEASCALE_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Transport retries per request
    #[arg(
        long,
        env = "IDEASCALE_MAX_RETRIES",
        default_value_t = DEFAULT_MAX_RETRIES,
        global = true
    )]
    pub max_retries: u32,

    /// Challenges requested concurrently
    #[arg(long, env = "IDEASCALE_CONCURRENCY", default_value_t = 1, global = true)]
    pub concurrency: usize,
}

impl ApiArgs {
    /// Build the client configuration
    ///
    /// # Errors
    /// If the base URL or token is missing or the result does not validate
    pub fn to_config(&self) -> Result<ApiConfig> {
        let Some(base_url) = self.base_url.as_deref().filter(|s| !s.trim().is_empty()) else {
            bail!("IDEASCALE_BASE_API_URL is not set");
        };
        let Some(api_token) = self.api_token.as_deref().filter(|s| !s.trim().is_empty()) else {
            bail!("IDEASCALE_API_TOKEN is not set");
        };

        let config = ApiConfig::new(base_url, api_token)
            .with_max_retries(self.max_retries)
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
            .with_concurrency(self.concurrency);
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Debug for ApiArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiArgs")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}
