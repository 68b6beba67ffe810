//! Proposal scoring with percentile cohorts

use crate::report::{Cell, Report};
use crate::stats::{group_by, max, min, round2, top_cohort_mean};
use catalyst_datasets::{ProposalScoreRow, Withdrawals};
use std::collections::BTreeMap;

/// Mean rating of the top 10% of proposals
pub const TOP_10: &str = "Top 10%";
/// Mean rating of the top 20% of proposals
pub const TOP_20: &str = "Top 20%";
/// Highest rating
pub const HIGHEST: &str = "Highest";
/// Lowest rating
pub const LOWEST: &str = "Lowest";

/// Fraction of proposals in the top-10% cohort
pub const TOP_10_FRACTION: f64 = 0.10;
/// Fraction of proposals in the top-20% cohort
pub const TOP_20_FRACTION: f64 = 0.20;

/// Ratings per challenge, in file order
pub(crate) fn ratings_by_challenge(
    scores: &[&ProposalScoreRow],
) -> BTreeMap<String, Vec<Option<f64>>> {
    group_by(scores.iter().copied(), |row| row.challenge.clone())
        .into_iter()
        .map(|(challenge, rows)| (challenge, rows.iter().map(|r| r.rating_given).collect()))
        .collect()
}

/// Per-challenge cohort means and extrema
#[must_use]
pub fn proposals_score(scores: &[ProposalScoreRow], withdrawals: &Withdrawals) -> Report {
    let valid = withdrawals.exclude(scores, |row| row.proposal_id);
    let mut report = Report::new(&[TOP_10, TOP_20, HIGHEST, LOWEST]);

    for (challenge, ratings) in ratings_by_challenge(&valid) {
        report.insert(
            challenge,
            vec![
                Cell::value(top_cohort_mean(&ratings, TOP_10_FRACTION).map(round2)),
                Cell::value(top_cohort_mean(&ratings, TOP_20_FRACTION).map(round2)),
                Cell::value(max(ratings.iter().copied())),
                Cell::value(min(ratings.iter().copied())),
            ],
        );
    }
    report
}
