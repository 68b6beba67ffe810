//! Command handlers
//!
//! Each handler loads its inputs, runs one pipeline and writes the report.
//! The returned text is what the binary prints on stdout.

use crate::args::{ApiArgs, ChallengeCommand, Cli, Command};
use anyhow::{Context, Result};
use catalyst_datasets::{
    load_assessments, load_proposal_scores, load_proposals_json, load_voting_results,
    ChallengeMap, EntityTable, Withdrawals,
};
use catalyst_ideascale::IdeascaleClient;
use catalyst_stats::{
    assign_challenges, challenge_specific_funded, criteria_score, fund_stats, fund_stats_funded,
    health_check, innovation_baseline, proposals_score, RemoteOptions, Report,
};
use std::path::Path;
use tracing::{debug, info};

/// Run a parsed command line
///
/// # Errors
/// Any input, remote or output failure; no report file is left behind.
pub async fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Command::Challenges(command) => run_challenge_command(command, &cli.api).await,
    }
}

async fn run_challenge_command(command: ChallengeCommand, api_args: &ApiArgs) -> Result<String> {
    debug!(?command, "running challenge command");
    if command.needs_api() {
        // settings are checked before any input file is read
        api_args.to_config()?;
    }
    match command {
        ChallengeCommand::CriteriaScore {
            input_file,
            withdrawals_file,
            output_file,
        } => {
            let assessments = load_assessments(&input_file)?;
            let withdrawals = load_withdrawals(withdrawals_file.as_deref())?;
            let report = criteria_score(&assessments, &withdrawals);
            write_report(&report, &output_file)
        }

        ChallengeCommand::ProposalsScore {
            input_file,
            withdrawals_file,
            output_file,
        } => {
            let scores = load_proposal_scores(&input_file)?;
            let withdrawals = load_withdrawals(withdrawals_file.as_deref())?;
            let report = proposals_score(&scores, &withdrawals);
            write_report(&report, &output_file)
        }

        ChallengeCommand::HealthCheck {
            assessments_file,
            proposals_file,
            challenges_map,
            withdrawals_file,
            output_file,
            governance_stage,
        } => {
            let assessments = load_assessments(&assessments_file)?;
            let scores = load_proposal_scores(&proposals_file)?;
            let challenges = ChallengeMap::load(&challenges_map)?;
            let withdrawals = load_withdrawals(withdrawals_file.as_deref())?;
            let (client, options) = connect(api_args, governance_stage)?;

            let report = health_check(
                &client,
                &assessments,
                &scores,
                &challenges,
                &withdrawals,
                &options,
            )
            .await
            .context("health check failed")?;
            write_report(&report, &output_file)
        }

        ChallengeCommand::InnovationBaseline {
            challenges_map,
            withdrawals_file,
            output_file,
            governance_stage,
        } => {
            let challenges = ChallengeMap::load(&challenges_map)?;
            let withdrawals = load_withdrawals(withdrawals_file.as_deref())?;
            let (client, options) = connect(api_args, governance_stage)?;

            let report = innovation_baseline(&client, &challenges, &withdrawals, &options)
                .await
                .context("innovation baseline failed")?;
            write_report(&report, &output_file)
        }

        ChallengeCommand::ChallengeSpecificFunded {
            proposals_file,
            voting_results,
            withdrawals_file,
            output_file,
        } => {
            let scores = load_proposal_scores(&proposals_file)?;
            let results = load_voting_results(&voting_results)?;
            let withdrawals = load_withdrawals(withdrawals_file.as_deref())?;
            let report = challenge_specific_funded(&scores, &results, &withdrawals);
            write_report(&report, &output_file)
        }

        ChallengeCommand::FundStatsFunded {
            proposals_file,
            voting_results,
            withdrawals_file,
            challenge_setting_title,
        } => {
            let scores = load_proposal_scores(&proposals_file)?;
            let results = load_voting_results(&voting_results)?;
            let withdrawals = load_withdrawals(withdrawals_file.as_deref())?;
            let summary =
                fund_stats_funded(&scores, &results, &withdrawals, &challenge_setting_title);
            Ok(summary.to_string())
        }

        ChallengeCommand::AssignChallenges {
            input_file,
            proposals_file,
            challenges_file,
            output_file,
        } => {
            let mut entities = EntityTable::load(&input_file)?;
            let proposals = load_proposals_json(&proposals_file)?;
            let challenges = ChallengeMap::load(&challenges_file)?;
            let outcome = assign_challenges(&mut entities, &proposals, &challenges);
            write_entities(&entities, &output_file)?;
            Ok(format!(
                "Assigned {} of {} rows ({} unknown proposals, {} unknown challenges)",
                outcome.assigned,
                entities.len(),
                outcome.unknown_proposal,
                outcome.unknown_challenge
            ))
        }

        ChallengeCommand::FundStats {
            group_id,
            governance_stage,
        } => {
            let (client, _) = connect(api_args, governance_stage.clone())?;
            let totals = fund_stats(&client, group_id, &governance_stage)
                .await
                .with_context(|| format!("fund stats for group {group_id} failed"))?;
            Ok(totals.to_string())
        }
    }
}

fn connect(
    api_args: &ApiArgs,
    governance_stage: String,
) -> Result<(IdeascaleClient, RemoteOptions)> {
    let config = api_args.to_config()?;
    let options = RemoteOptions::default()
        .with_governance_stage(governance_stage)
        .with_concurrency(config.effective_concurrency());
    let client = IdeascaleClient::new(&config).context("failed to build API client")?;
    info!(
        base_url = config.base_url(),
        concurrency = options.concurrency,
        governance_stage = %options.governance_stage,
        "api client ready"
    );
    Ok((client, options))
}

fn load_withdrawals(path: Option<&Path>) -> Result<Withdrawals> {
    let Some(path) = path else {
        return Ok(Withdrawals::none());
    };
    let withdrawals = Withdrawals::load(path)?;
    info!(count = withdrawals.len(), "withdrawn proposals loaded");
    Ok(withdrawals)
}

fn write_report(report: &Report, output: &Path) -> Result<String> {
    report.write_csv(output)?;
    Ok(report.to_string())
}

fn write_entities(entities: &EntityTable, output: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    entities.write_csv(&mut buffer, output)?;
    catalyst_stats::report::persist(output, &buffer)?;
    Ok(())
}
