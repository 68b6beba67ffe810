//! Funding outcome reports
//!
//! Proposal scores are left-joined with the on-chain voting results on
//! `proposal_id = internal_id`. A score row without a voting result is
//! neither funded nor approved.

use super::proposals::ratings_by_challenge;
use crate::report::{Cell, Report};
use crate::stats::{count, max, mean, min, round2};
use catalyst_datasets::{ProposalScoreRow, VotingResultRow, Withdrawals};
use catalyst_ideascale::ProposalId;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Funded proposals with a rating
pub const COUNT: &str = "Count";
/// Highest rating among funded proposals
pub const HIGH: &str = "High";
/// Lowest rating among funded proposals
pub const LOW: &str = "Low";
/// Mean rating of funded proposals
pub const AVG_SCORE: &str = "AVG Score";

/// A proposal score with its voting outcome, if any
#[derive(Debug, Clone, Copy)]
pub struct JoinedScore<'a> {
    /// Local score row
    pub score: &'a ProposalScoreRow,
    /// Matching voting result
    pub result: Option<&'a VotingResultRow>,
}

impl JoinedScore<'_> {
    /// Check if the proposal was funded
    #[inline]
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.result.is_some_and(VotingResultRow::is_funded)
    }

    /// Check if the proposal met the approval threshold
    #[inline]
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.result.is_some_and(VotingResultRow::is_approved)
    }
}

/// Left join of non-withdrawn scores with voting results
///
/// When a voting result id repeats, the first row wins. Results without an
/// id never match and are skipped.
#[must_use]
pub fn join_voting_results<'a>(
    scores: &'a [ProposalScoreRow],
    results: &'a [VotingResultRow],
    withdrawals: &Withdrawals,
) -> Vec<JoinedScore<'a>> {
    let mut by_id: HashMap<ProposalId, &VotingResultRow> = HashMap::with_capacity(results.len());
    for result in results {
        let Some(internal_id) = result.internal_id else {
            warn!(
                chain_id = %result.chain_proposal_id,
                "voting result without internal_id, skipping"
            );
            continue;
        };
        if by_id.contains_key(&internal_id) {
            warn!(internal_id, "duplicate voting result, keeping the first");
            continue;
        }
        by_id.insert(internal_id, result);
    }

    let joined: Vec<JoinedScore<'a>> = withdrawals
        .exclude(scores, |row| row.proposal_id)
        .into_iter()
        .map(|score| JoinedScore {
            score,
            result: by_id.get(&score.proposal_id).copied(),
        })
        .collect();

    let unmatched = joined.iter().filter(|j| j.result.is_none()).count();
    if unmatched > 0 {
        warn!(unmatched, "score rows without a voting result");
    }
    debug!(rows = joined.len(), "scores joined with voting results");
    joined
}

/// Per-challenge figures over funded proposals
#[must_use]
pub fn challenge_specific_funded(
    scores: &[ProposalScoreRow],
    results: &[VotingResultRow],
    withdrawals: &Withdrawals,
) -> Report {
    let funded: Vec<&ProposalScoreRow> = join_voting_results(scores, results, withdrawals)
        .into_iter()
        .filter(JoinedScore::is_funded)
        .map(|j| j.score)
        .collect();

    let mut report = Report::new(&[COUNT, HIGH, LOW, AVG_SCORE]);
    for (challenge, ratings) in ratings_by_challenge(&funded) {
        report.insert(
            challenge,
            vec![
                Cell::Count(count(ratings.iter().copied())),
                Cell::value(max(ratings.iter().copied()).map(round2)),
                Cell::value(min(ratings.iter().copied()).map(round2)),
                Cell::value(mean(ratings.iter().copied()).map(round2)),
            ],
        );
    }
    report
}

/// Fund-wide approval and funding counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FundedSummary {
    /// Proposals meeting the approval threshold
    pub approved: usize,
    /// Funded proposals
    pub funded: usize,
    /// Funded proposals outside the challenge-setting challenge
    pub funded_regular: usize,
    /// Funded proposals in the challenge-setting challenge
    pub funded_challenge_setting: usize,
}

impl fmt::Display for FundedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Proposals - approved: {}", self.approved)?;
        writeln!(f, "Proposals - funded (all): {}", self.funded)?;
        writeln!(f, "Proposals - funded (regular): {}", self.funded_regular)?;
        write!(
            f,
            "Proposals - funded (challenge setting): {}",
            self.funded_challenge_setting
        )
    }
}

/// Count approved and funded proposals
///
/// `challenge_setting_title` names the challenge reported separately.
#[must_use]
pub fn fund_stats_funded(
    scores: &[ProposalScoreRow],
    results: &[VotingResultRow],
    withdrawals: &Withdrawals,
    challenge_setting_title: &str,
) -> FundedSummary {
    let joined = join_voting_results(scores, results, withdrawals);

    let mut summary = FundedSummary {
        approved: joined.iter().filter(|j| j.is_approved()).count(),
        ..FundedSummary::default()
    };
    for j in joined.iter().filter(|j| j.is_funded()) {
        summary.funded += 1;
        if j.score.challenge == challenge_setting_title {
            summary.funded_challenge_setting += 1;
        } else {
            summary.funded_regular += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> (Vec<ProposalScoreRow>, Vec<VotingResultRow>) {
        let scores = vec![
            ProposalScoreRow::new(1, "DApps", 4.5),
            ProposalScoreRow::new(2, "DApps", 3.25),
            ProposalScoreRow::new(3, "DApps", 2.0),
            ProposalScoreRow::new(4, "Challenge Setting", 4.0),
            ProposalScoreRow::new(5, "DApps", 1.0),
        ];
        let results = vec![
            VotingResultRow::new(1, "FUNDED", "YES"),
            VotingResultRow::new(2, "FUNDED", "YES"),
            VotingResultRow::new(3, "NOT_FUNDED", "YES"),
            VotingResultRow::new(4, "FUNDED", "YES"),
            VotingResultRow::new(99, "FUNDED", "YES"),
        ];
        (scores, results)
    }

    #[test]
    fn only_funded_rows_contribute() {
        let (scores, results) = fixture();
        let report = challenge_specific_funded(&scores, &results, &Withdrawals::none());

        assert_eq!(
            report.row("DApps").unwrap(),
            &[
                Cell::Count(2),
                Cell::Value(4.5),
                Cell::Value(3.25),
                Cell::Value(3.88),
            ]
        );
        assert_eq!(report.get("Challenge Setting", COUNT), Some(Cell::Count(1)));
    }

    #[test]
    fn unmatched_scores_are_not_funded() {
        let (scores, results) = fixture();
        let joined = join_voting_results(&scores, &results, &Withdrawals::none());
        let unmatched: Vec<_> = joined.iter().filter(|j| j.result.is_none()).collect();
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].score.proposal_id, 5);
        assert!(!unmatched[0].is_funded());
    }

    #[test]
    fn results_without_internal_id_are_skipped() {
        let (scores, mut results) = fixture();
        let mut orphan = VotingResultRow::new(0, "FUNDED", "YES");
        orphan.internal_id = None;
        results.insert(0, orphan);

        let summary =
            fund_stats_funded(&scores, &results, &Withdrawals::none(), "Challenge Setting");
        assert_eq!(summary.funded, 3);
        assert_eq!(summary.approved, 4);
    }

    #[test]
    fn summary_splits_challenge_setting() {
        let (scores, results) = fixture();
        let summary =
            fund_stats_funded(&scores, &results, &Withdrawals::none(), "Challenge Setting");

        assert_eq!(
            summary,
            FundedSummary {
                approved: 4,
                funded: 3,
                funded_regular: 2,
                funded_challenge_setting: 1,
            }
        );
        assert!(summary.to_string().starts_with("Proposals - approved: 4\n"));
    }

    #[test]
    fn withdrawn_funded_proposal_is_dropped() {
        let (scores, results) = fixture();
        let withdrawn: Withdrawals = [1].into_iter().collect();
        let summary = fund_stats_funded(&scores, &results, &withdrawn, "Challenge Setting");
        assert_eq!(summary.funded, 2);
        assert_eq!(summary.approved, 3);
    }
}
