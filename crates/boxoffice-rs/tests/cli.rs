//! Command-line integration tests.

use boxoffice_rs::cli::{
    Cli, load_draft, render_dashboard, render_history, render_history_json, resolve_config,
    submit_draft,
};
use boxoffice_rs::core::DashboardSummary;
use boxoffice_rs::history::{HistoryStore, MemoryHistoryStore};
use boxoffice_rs::model::{ContentRating, Genre, PredictionRecord};
use boxoffice_rs_test_utils::{FailingPredictor, FixedPredictor, sample_input, scenario_prediction};
use clap::Parser;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::tempdir;

const SCENARIO_DRAFT: &str = r#"{
  // JSON5 comments are allowed
  title: "X",
  director: "Y",
  duration: 120,
  budget: 1000000,
  mpaRating: "PG-13",
  releaseDate: "2024-01-01",
  genres: ["Drama"],
  languages: ["English"],
  countries: ["United States"],
  stars: ["A", ""],
  writers: ["B"],
  productionCompanies: ["C"],
}"#;

#[test]
fn flags_override_layered_config() {
    let temp = tempdir().expect("tempdir");
    fs::write(
        temp.path().join("boxoffice.json5"),
        r#"{ service: { base_url: "http://cwd.example:9000" } }"#,
    )
    .expect("write cwd config");

    let cli = Cli::try_parse_from(["boxoffice", "history"]).expect("parse");
    let config = resolve_config(&cli, temp.path()).expect("config");
    assert_eq!(config.service.base_url, "http://cwd.example:9000");

    let cli = Cli::try_parse_from([
        "boxoffice",
        "--endpoint",
        "https://predict.example",
        "--history-dir",
        "/var/lib/boxoffice",
        "history",
    ])
    .expect("parse");
    let config = resolve_config(&cli, temp.path()).expect("config");
    assert_eq!(
        config.service.submit_url(),
        "https://predict.example/api/submit"
    );
    assert_eq!(config.history.dir(), PathBuf::from("/var/lib/boxoffice"));
}

#[test]
fn runtime_config_file_is_applied() {
    let temp = tempdir().expect("tempdir");
    let runtime = temp.path().join("override.json5");
    fs::write(&runtime, r#"{ history: { storage_key: "staging" } }"#).expect("write");
    let cli = Cli::try_parse_from([
        "boxoffice",
        "--config",
        runtime.to_str().expect("utf8 path"),
        "dashboard",
    ])
    .expect("parse");
    let config = resolve_config(&cli, temp.path()).expect("config");
    assert_eq!(config.history.storage_key, "staging");
}

#[test]
fn bad_endpoint_override_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let cli =
        Cli::try_parse_from(["boxoffice", "--endpoint", "predict.example", "clear"]).expect("parse");
    let err = resolve_config(&cli, temp.path()).unwrap_err();
    assert!(format!("{err:#}").contains("service.base_url"));
}

#[test]
fn draft_file_loads_as_json5() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("draft.json5");
    fs::write(&path, SCENARIO_DRAFT).expect("write draft");
    let draft = load_draft(&path).expect("draft");
    assert_eq!(draft.title(), "X");
    assert_eq!(draft.content_rating(), ContentRating::Pg13);
    assert_eq!(draft.genres(), &[Genre::Drama]);
}

#[tokio::test]
async fn submit_stores_sanitized_record() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("draft.json5");
    fs::write(&path, SCENARIO_DRAFT).expect("write draft");
    let store = Arc::new(MemoryHistoryStore::new());

    let record = submit_draft(&path, store.clone(), &FixedPredictor::new(scenario_prediction()))
        .await
        .expect("submit");

    assert_eq!(record.input, sample_input());
    assert_eq!(record.predicted, scenario_prediction());
    assert_eq!(store.load(), vec![record]);
}

#[tokio::test]
async fn failed_submit_stores_nothing() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("draft.json5");
    fs::write(&path, SCENARIO_DRAFT).expect("write draft");
    let store = Arc::new(MemoryHistoryStore::new());

    let err = submit_draft(&path, store.clone(), &FailingPredictor::transport("refused"))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("refused"));
    assert!(store.load().is_empty());
}

#[test]
fn history_output_respects_limit() {
    let records: Vec<_> = (0..3)
        .map(|i| {
            let mut input = sample_input();
            input.title = format!("movie {i}");
            PredictionRecord::new(input, scenario_prediction())
        })
        .collect();

    let table = render_history(&records, Some(2));
    assert!(table.contains("movie 0"));
    assert!(table.contains("movie 1"));
    assert!(!table.contains("movie 2"));
    assert!(table.contains("1 more"));
    assert!(table.contains("$1,000"));

    let json = render_history_json(&records, Some(1)).expect("json");
    let decoded: Vec<PredictionRecord> = serde_json::from_str(&json).expect("decode");
    assert_eq!(decoded, records[..1].to_vec());
}

#[test]
fn dashboard_output_lists_aggregates() {
    let records = vec![PredictionRecord::new(sample_input(), scenario_prediction())];
    let text = render_dashboard(&DashboardSummary::from_records(&records));
    assert!(text.contains("Total predictions:  1"));
    assert!(text.contains("Average rating:     7.5"));
    assert!(text.contains("Highest grossing:   X ($1,000)"));
    assert!(text.contains("Success rate:       100%"));
    assert!(text.contains("Most common genre:  Drama"));

    let empty = render_dashboard(&DashboardSummary::default());
    assert!(empty.contains("Highest grossing:   None"));
}
