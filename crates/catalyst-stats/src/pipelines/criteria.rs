//! Criteria scoring
//!
//! Two overall scores are reported per challenge:
//! - proposal-first: each proposal's assessments are averaged (and rounded)
//!   before the challenge mean is taken
//! - raw: the challenge mean over every assessment row
//!
//! They differ whenever proposals have unequal assessment counts.

use crate::report::{Cell, Report};
use crate::stats::{group_by, mean, round2};
use catalyst_datasets::{AssessmentRow, Withdrawals};
use tracing::debug;

/// Proposal-first overall score
pub const AVG_OVERALL_SCORE: &str = "AVG Overall Score";
/// Overall score over raw assessment rows
pub const AVG_OVERALL_SCORE_RAW: &str = "AVG Overall Score (raw assessments)";
/// Mean impact / alignment rating
pub const AVG_IMPACT: &str = "AVG Impact";
/// Mean feasibility rating
pub const AVG_FEASIBILITY: &str = "AVG Feasibility";
/// Mean auditability rating
pub const AVG_AUDITABILITY: &str = "AVG Auditability";

/// Per-challenge criteria averages
#[must_use]
pub fn criteria_score(assessments: &[AssessmentRow], withdrawals: &Withdrawals) -> Report {
    let valid = withdrawals.exclude(assessments, |row| row.proposal_id);
    debug!(
        total = assessments.len(),
        valid = valid.len(),
        "assessments after withdrawals"
    );

    let mut report = Report::new(&[
        AVG_OVERALL_SCORE,
        AVG_OVERALL_SCORE_RAW,
        AVG_IMPACT,
        AVG_FEASIBILITY,
        AVG_AUDITABILITY,
    ]);

    for (challenge, rows) in group_by(valid, |row| row.challenge.clone()) {
        let by_proposal = group_by(rows.iter().copied(), |row| {
            (row.proposal_id, row.idea_title.clone())
        });
        let proposal_means = by_proposal
            .values()
            .map(|assessments| proposal_mean(assessments));

        report.insert(
            challenge,
            vec![
                Cell::value(mean(proposal_means).map(round2)),
                Cell::value(mean(rows.iter().map(|r| r.final_rating())).map(round2)),
                Cell::value(mean(rows.iter().map(|r| r.impact)).map(round2)),
                Cell::value(mean(rows.iter().map(|r| r.feasibility)).map(round2)),
                Cell::value(mean(rows.iter().map(|r| r.auditability)).map(round2)),
            ],
        );
    }
    report
}

fn proposal_mean(assessments: &[&AssessmentRow]) -> Option<f64> {
    mean(assessments.iter().map(|r| r.final_rating())).map(round2)
}
