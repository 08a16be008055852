//! End-to-end runs of the `labelscout` binary against a temp workspace.
//!
//! Each test gets its own directory with a `snapshots/` folder, so the
//! default config path and snapshot location resolve inside it.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "space": "FIN",
  "pages": [
    {"id": "root", "parent_id": null, "title": "Finance", "labels": ["directory-pages"]},
    {"id": "child1", "parent_id": "root", "title": "Invoices", "labels": ["billing"]},
    {"id": "child2", "parent_id": "root", "title": "Refunds", "labels": []},
    {"id": "misc", "parent_id": null, "title": "Misc", "labels": ["billing"]}
  ]
}"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::create_dir(dir.path().join("snapshots")).expect("failed to create snapshots dir");
    fs::write(dir.path().join("snapshots/FIN.json"), SNAPSHOT).expect("failed to write snapshot");
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_labelscout"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute labelscout")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("stdout is not valid JSON")
}

#[test]
fn test_spaces_lists_snapshots() {
    let dir = workspace();
    let out = run(dir.path(), &["spaces", "--json"]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out), serde_json::json!(["FIN"]));
}

#[test]
fn test_clusters_json() {
    let dir = workspace();
    let out = run(dir.path(), &["clusters", "FIN", "--json"]);
    assert!(out.status.success());
    let json = stdout_json(&out);
    assert_eq!(json["clusters"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["clusters"][0]["vocabulary"]["billing"], 1);
    assert_eq!(json["unclustered"], serde_json::json!(["misc"]));
    assert_eq!(json["space_labels"]["billing"], 2);
    assert_eq!(json["space_labels"]["directory-pages"], 1);
}

#[test]
fn test_suggest_threshold_from_config() {
    let dir = workspace();

    let out = run(dir.path(), &["suggest", "FIN", "--json"]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out), serde_json::json!([]), "0.5 is below the 0.7 default");

    fs::write(
        dir.path().join("labelscout.toml"),
        "[selection]\nmin_confidence = 0.5\n",
    )
    .unwrap();
    let out = run(dir.path(), &["suggest", "FIN", "--json"]);
    assert_eq!(
        stdout_json(&out),
        serde_json::json!([{"page_id": "child2", "label": "billing", "confidence": 0.5}])
    );
}

#[test]
fn test_suggest_then_apply_to_file() {
    let dir = workspace();
    let out = run(dir.path(), &["suggest", "FIN", "--all", "--json"]);
    assert!(out.status.success());
    fs::write(dir.path().join("selection.json"), &out.stdout).unwrap();

    let out = run(
        dir.path(),
        &[
            "apply",
            "FIN",
            "--selection",
            "selection.json",
            "--out",
            "mutations.jsonl",
            "--update-snapshot",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let mutations = fs::read_to_string(dir.path().join("mutations.jsonl")).unwrap();
    assert_eq!(
        mutations.trim(),
        r#"{"page_id":"child2","label":"billing","confidence":0.5}"#
    );

    let again = run(dir.path(), &["suggest", "FIN", "--all", "--json"]);
    assert_eq!(stdout_json(&again), serde_json::json!([]));
}

#[test]
fn test_empty_selection_exit_code() {
    let dir = workspace();
    fs::write(dir.path().join("selection.json"), "[]").unwrap();
    let out = run(dir.path(), &["apply", "FIN", "--selection", "selection.json"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_unknown_page_exit_code() {
    let dir = workspace();
    fs::write(
        dir.path().join("selection.json"),
        r#"[{"page_id": "misc", "label": "x"}]"#,
    )
    .unwrap();
    let out = run(dir.path(), &["apply", "FIN", "--selection", "selection.json"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_missing_space_exit_code() {
    let dir = workspace();
    let out = run(dir.path(), &["clusters", "NOPE"]);
    assert_eq!(out.status.code(), Some(4));
}

#[test]
fn test_cyclic_snapshot_exit_code() {
    let dir = workspace();
    fs::write(
        dir.path().join("snapshots/LOOP.json"),
        r#"{"pages": [
            {"id": "a", "parent_id": "b", "title": "A", "labels": []},
            {"id": "b", "parent_id": "a", "title": "B", "labels": []}
        ]}"#,
    )
    .unwrap();
    let out = run(dir.path(), &["clusters", "LOOP"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_clusters_text_shows_space_labels() {
    let dir = workspace();
    let out = run(dir.path(), &["clusters", "FIN"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Space labels: billing×2, directory-pages×1"), "{stdout}");
}

#[test]
fn test_marker_override() {
    let dir = workspace();
    let out = run(dir.path(), &["--marker", "billing", "clusters", "FIN", "--json"]);
    assert!(out.status.success());
    let roots: Vec<_> = stdout_json(&out)["clusters"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["cluster"]["root"]["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(roots, vec!["child1", "misc"]);
}

#[test]
fn test_min_confidence_out_of_range_rejected() {
    let dir = workspace();
    for value in ["1.5", "2", "NaN"] {
        let out = run(dir.path(), &["suggest", "FIN", "--min-confidence", value]);
        assert_eq!(out.status.code(), Some(2), "--min-confidence {value}");
        assert!(out.stdout.is_empty());
    }

    let out = run(dir.path(), &["suggest", "FIN", "--min-confidence", "0.5", "--json"]);
    assert!(out.status.success());
    assert_eq!(stdout_json(&out).as_array().map(Vec::len), Some(1));
}
