//! File loaders
//!
//! Every loader has a path-based form used by the binary and a reader-based
//! form used by tests. Paths are only used for error context.

use crate::error::{DatasetError, DatasetResult};
use crate::records::{AssessmentRow, ChallengeRef, ProposalScoreRow, VotingResultRow};
use catalyst_ideascale::Proposal;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Deserialize every record of a headed CSV
///
/// # Errors
/// `DatasetError::Csv` on malformed rows or fields that do not match `T`
pub fn read_csv_from<T, R>(reader: R, origin: &Path) -> DatasetResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let rows = csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| DatasetError::csv_error(origin, e))?;

    debug!(path = %origin.display(), rows = rows.len(), "loaded csv");
    Ok(rows)
}

/// Deserialize every record of a headed CSV file
///
/// # Errors
/// `DatasetError::Io` if the file cannot be opened, otherwise as
/// [`read_csv_from`]
pub fn read_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> DatasetResult<Vec<T>> {
    let path = path.as_ref();
    read_csv_from(open(path)?, path)
}

/// Deserialize a JSON document
///
/// # Errors
/// `DatasetError::Json` if the document does not match `T`
pub fn read_json_from<T, R>(reader: R, origin: &Path) -> DatasetResult<T>
where
    T: DeserializeOwned,
    R: Read,
{
    serde_json::from_reader(BufReader::new(reader)).map_err(|source| DatasetError::Json {
        path: origin.to_path_buf(),
        source,
    })
}

/// Deserialize a JSON file
///
/// # Errors
/// `DatasetError::Io` if the file cannot be opened, otherwise as
/// [`read_json_from`]
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> DatasetResult<T> {
    let path = path.as_ref();
    read_json_from(open(path)?, path)
}

/// Load the valid-assessments CSV
///
/// # Errors
/// See [`read_csv`]
pub fn load_assessments(path: impl AsRef<Path>) -> DatasetResult<Vec<AssessmentRow>> {
    read_csv(path)
}

/// Load the proposals-score CSV
///
/// # Errors
/// See [`read_csv`]
pub fn load_proposal_scores(path: impl AsRef<Path>) -> DatasetResult<Vec<ProposalScoreRow>> {
    read_csv(path)
}

/// Load the merged voting-results CSV
///
/// # Errors
/// See [`read_csv`]
pub fn load_voting_results(path: impl AsRef<Path>) -> DatasetResult<Vec<VotingResultRow>> {
    read_csv(path)
}

/// Load a `[{title, id}]` JSON array (challenge map or challenges export)
///
/// # Errors
/// See [`read_json`]
pub fn load_challenges(path: impl AsRef<Path>) -> DatasetResult<Vec<ChallengeRef>> {
    read_json(path)
}

/// Load an exported proposals JSON array
///
/// # Errors
/// See [`read_json`]
pub fn load_proposals_json(path: impl AsRef<Path>) -> DatasetResult<Vec<Proposal>> {
    read_json(path)
}

pub(crate) fn open(path: &Path) -> DatasetResult<File> {
    File::open(path).map_err(|e| DatasetError::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const ASSESSMENTS: &str = "\
proposal_id,Idea Title,Challenge,Impact / Alignment Rating,Feasibility Rating,Auditability Rating,Assessor
1,Wallet,Developer Ecosystem,5,4,3,ca_1
2,Oracle, Developer Ecosystem ,3,,3,ca_2
";

    #[test]
    fn assessments_parse_with_blank_ratings() {
        let rows: Vec<AssessmentRow> =
            read_csv_from(ASSESSMENTS.as_bytes(), Path::new("assessments.csv")).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].idea_title, "Wallet");
        assert_eq!(rows[0].impact, Some(5.0));
        assert_eq!(rows[1].challenge, "Developer Ecosystem");
        assert_eq!(rows[1].feasibility, None);
    }

    #[test]
    fn voting_results_rename_chain_id() {
        let csv = "internal_id,proposal_id,status,meets_approval_threshold\n\
                   10,0xabc,FUNDED,YES\n11,0xdef,NOT_FUNDED,NO\n";
        let rows: Vec<VotingResultRow> =
            read_csv_from(csv.as_bytes(), Path::new("voting.csv")).unwrap();

        assert_eq!(rows[0].internal_id, Some(10));
        assert_eq!(rows[0].chain_proposal_id, "0xabc");
        assert!(rows[0].is_funded());
        assert!(!rows[1].is_approved());
    }

    #[test]
    fn blank_internal_id_loads_as_none() {
        let csv = "internal_id,proposal_id,status,meets_approval_threshold\n\
                   10,0xa,FUNDED,YES\n,0xb,FUNDED,YES\n";
        let rows: Vec<VotingResultRow> =
            read_csv_from(csv.as_bytes(), Path::new("voting.csv")).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].internal_id, None);
        assert_eq!(rows[1].chain_proposal_id, "0xb");
    }

    #[test]
    fn bad_field_is_a_csv_error() {
        let csv = "proposal_id,Challenge,Rating Given\nabc,A,3\n";
        let err = read_csv_from::<ProposalScoreRow, _>(csv.as_bytes(), Path::new("scores.csv"))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_proposal_scores("/nonexistent/scores.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn challenge_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "Developer Ecosystem", "id": 25}}, {{"title": "DApps", "id": 26}}]"#
        )
        .unwrap();

        let challenges = load_challenges(file.path()).unwrap();
        assert_eq!(challenges.len(), 2);
        assert_eq!(challenges[1], ChallengeRef::new("DApps", 26));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = read_json_from::<Vec<ChallengeRef>, _>(&b"{"[..], Path::new("map.json"))
            .unwrap_err();
        assert!(matches!(err, DatasetError::Json { .. }));
    }
}
