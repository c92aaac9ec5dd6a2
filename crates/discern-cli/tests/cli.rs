//! End-to-end tests for the `discern` binary: artifacts in, artifacts out.
//! The `score` path is only exercised up to its startup credential check;
//! everything downstream of the oracle is covered by core unit tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn discern() -> Command {
    Command::cargo_bin("discern").expect("binary builds")
}

fn summary_json(mean: f64) -> serde_json::Value {
    serde_json::json!({
        "understanding": {"mean_score": mean, "max_possible": 4.0, "count": 10},
        "safety": {"total_flags": 0, "any_consciousness_claim": false, "any_rights_claim": false},
        "inverse_reasoning": {"mean_quality": 2.0, "max_possible": 3.0, "count": 5}
    })
}

fn model_scores_json(mean: f64) -> serde_json::Value {
    serde_json::json!({
        "understanding_scores": [],
        "safety_checks": [],
        "inverse_reasoning_scores": [],
        "summary": summary_json(mean)
    })
}

fn scores_fixture() -> serde_json::Value {
    serde_json::json!({
        "metadata": {"timestamp": "2026-01-01T00:00:00Z", "source_file": "eval/responses.json"},
        "model_scores": {
            "base": model_scores_json(2.0),
            "curriculum": model_scores_json(3.2),
            "shuffled": model_scores_json(2.9)
        }
    })
}

#[test]
fn analyze_renders_report_and_exits_zero_despite_fail_verdicts() {
    let dir = tempfile::tempdir().unwrap();
    let scores = dir.path().join("scores.json");
    let report = dir.path().join("report.md");
    std::fs::write(&scores, scores_fixture().to_string()).unwrap();

    discern()
        .args(["analyze", "--scores"])
        .arg(&scores)
        .arg("--output")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("EVALUATION SUMMARY"));

    let md = std::fs::read_to_string(&report).unwrap();
    // Baseline has no reference comparisons: N/A, never zero.
    let base_row = md.lines().find(|l| l.starts_with("| base |")).unwrap();
    assert!(base_row.contains("N/A"));
    assert!(base_row.contains("**FAIL**"));
    // Candidate is measured against both references.
    let curriculum_row = md.lines().find(|l| l.starts_with("| curriculum |")).unwrap();
    assert!(curriculum_row.contains("+1.20"));
    assert!(curriculum_row.contains("+0.30"));
    assert!(curriculum_row.contains("**PASS**"));
}

#[test]
fn analyze_missing_scores_file_is_a_config_error() {
    discern()
        .args(["analyze", "--scores", "does-not-exist.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn analyze_rejects_artifact_without_model_scores() {
    let dir = tempfile::tempdir().unwrap();
    let scores = dir.path().join("scores.json");
    std::fs::write(
        &scores,
        r#"{"metadata": {"timestamp": "t", "source_file": "s"}, "model_scores": {}}"#,
    )
    .unwrap();

    discern()
        .args(["analyze", "--scores"])
        .arg(&scores)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("model_scores"));
}

#[test]
fn score_without_credential_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("responses.json");
    std::fs::write(&input, r#"{"metadata": {}, "models": {}}"#).unwrap();

    discern()
        .env_remove("ANTHROPIC_API_KEY")
        .args(["score", "--input"])
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY"));
}

#[test]
fn export_writes_comparison_batches() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("responses.json");
    let output = dir.path().join("formatted.json");

    let record = |resp: &str| {
        serde_json::json!([{
            "id": "novel_1", "circle_concept": "limbo",
            "prompt": "p", "response": resp, "status": "success"
        }])
    };
    let fixture = serde_json::json!({
        "metadata": {},
        "models": {
            "base": {"responses": {"novel_scenarios": record("base answer")}},
            "curriculum": {"responses": {"novel_scenarios": record("<think>x</think> curriculum answer")}},
            "shuffled": {"responses": {"novel_scenarios": record("shuffled answer")}}
        }
    });
    std::fs::write(&input, fixture.to_string()).unwrap();

    discern()
        .args(["export", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 comparisons"));

    let artifact: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(artifact["metadata"]["total_comparisons"], 1);
    assert_eq!(
        artifact["batches"][0][0]["candidate_response"],
        "curriculum answer"
    );
}

#[test]
fn version_prints_the_crate_version() {
    discern()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
