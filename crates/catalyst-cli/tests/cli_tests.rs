//! Command runs end to end: files in, report out, platform mocked.

use catalyst_cli::{run, Cli};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["catalyst-dashboard", "challenges"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn s(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[tokio::test]
async fn criteria_score_writes_transposed_report() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "assessments.csv",
        "proposal_id,Idea Title,Challenge,Impact / Alignment Rating,Feasibility Rating,Auditability Rating\n\
         1,One,A,5,5,5\n\
         2,Two,A,3,3,3\n\
         3,Three,A,1,1,1\n",
    );
    let withdrawals = write(&dir, "withdrawals.csv", "proposal_id\n3\n");
    let output = dir.path().join("out.csv");

    let printed = run(cli(&[
        "criteria-score",
        "--input-file",
        s(&input),
        "--withdrawals-file",
        s(&withdrawals),
        "--output-file",
        s(&output),
    ]))
    .await
    .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().next(), Some(",A"));
    assert_eq!(written.lines().nth(1), Some("AVG Overall Score,4.00"));
    assert!(printed.contains("AVG Overall Score"));
}

#[tokio::test]
async fn health_check_against_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/campaign/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "DApps",
            "commentCount": 9,
            "stageStatistics": [
                {"label": "Insight sharing reserve", "ideaCount": 2},
                {"label": "Archive", "ideaCount": 3},
                {"label": "Governance phase", "ideaCount": 11}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let assessments = write(
        &dir,
        "assessments.csv",
        "proposal_id,Idea Title,Challenge,Impact / Alignment Rating,Feasibility Rating,Auditability Rating\n\
         1,One,DApps,5,5,5\n",
    );
    let scores = write(&dir, "scores.csv", "proposal_id,Challenge,Rating Given\n1,DApps,4.1\n");
    let map = write(&dir, "map.json", r#"[{"title": "DApps", "id": 42}]"#);
    let output = dir.path().join("health.csv");

    run(cli(&[
        "health-check",
        "--base-url",
        &server.uri(),
        "--api-token",
        "token",
        "--assessments-file",
        s(&assessments),
        "--proposals-file",
        s(&scores),
        "--challenges-map",
        s(&map),
        "--output-file",
        s(&output),
        "--governance-stage",
        "Governance phase",
    ]))
    .await
    .unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            ",DApps",
            "CA Reviews (valid),1",
            "Insights,2",
            "Ideas,14",
            "Proposals,11",
            "Comments,9",
            "Top 10%,",
        ]
    );
}

#[tokio::test]
async fn remote_failure_leaves_no_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/campaign/42"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let map = write(&dir, "map.json", r#"[{"title": "DApps", "id": 42}]"#);
    let output = dir.path().join("baseline.csv");

    let err = run(cli(&[
        "innovation-baseline",
        "--base-url",
        &server.uri(),
        "--api-token",
        "token",
        "--challenges-map",
        s(&map),
        "--output-file",
        s(&output),
    ]))
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("503"));
    assert!(!output.exists());
}

#[tokio::test]
async fn fund_stats_prints_totals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/campaigns/groups/63"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "campaigns": [
                {"id": 1, "name": "A", "stageStatistics": [
                    {"label": "Assess QA", "ideaCount": 10},
                    {"label": "Archive", "ideaCount": 4}
                ]},
                {"id": 2, "name": "B", "stageStatistics": [
                    {"label": "Assess QA", "ideaCount": 5},
                    {"label": "Insight sharing reserve", "ideaCount": 7}
                ]}
            ]
        }])))
        .mount(&server)
        .await;

    let printed = run(cli(&[
        "fund-stats",
        "--base-url",
        &server.uri(),
        "--api-token",
        "token",
        "--group-id",
        "63",
    ]))
    .await
    .unwrap();

    assert_eq!(
        printed,
        "Total submissions: 19\nTotal archived: 4\nTotal insights: 7\nTotal active: 15"
    );
}

#[tokio::test]
async fn remote_command_without_token_fails_early() {
    let dir = TempDir::new().unwrap();
    let map = write(&dir, "map.json", "[]");

    let mut parsed = cli(&[
        "innovation-baseline",
        "--base-url",
        "http://127.0.0.1:9",
        "--challenges-map",
        s(&map),
        "--output-file",
        s(&dir.path().join("out.csv")),
    ]);
    parsed.api.api_token = None;

    let err = run(parsed).await.unwrap_err();
    assert!(err.to_string().contains("IDEASCALE_API_TOKEN"));
}

#[tokio::test]
async fn api_settings_checked_before_inputs() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");

    let mut parsed = cli(&[
        "health-check",
        "--base-url",
        "http://127.0.0.1:9",
        "--assessments-file",
        s(&missing),
        "--proposals-file",
        s(&missing),
        "--challenges-map",
        s(&missing),
        "--output-file",
        s(&dir.path().join("out.csv")),
    ]);
    parsed.api.api_token = None;

    let err = run(parsed).await.unwrap_err();
    assert!(err.to_string().contains("IDEASCALE_API_TOKEN"));
}

#[tokio::test]
async fn assign_challenges_adds_column() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "entities.csv", "proposal_id,reviewer\n5,alice\n6,bob\n");
    let proposals = write(&dir, "proposals.json", r#"[{"id": 5, "category": 100}]"#);
    let challenges = write(&dir, "challenges.json", r#"[{"title": "DApps", "id": 100}]"#);
    let output = dir.path().join("assigned.csv");

    let printed = run(cli(&[
        "assign-challenges",
        "--input-file",
        s(&input),
        "--proposals-file",
        s(&proposals),
        "--challenges-file",
        s(&challenges),
        "--output-file",
        s(&output),
    ]))
    .await
    .unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "proposal_id,reviewer,Challenge\n5,alice,DApps\n6,bob,\n"
    );
    assert!(printed.starts_with("Assigned 1 of 2 rows"));
}
