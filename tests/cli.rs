//! Integration tests for top-level CLI behavior.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;

use repoviz::cassette::recorder::CassetteRecorder;

fn run_repoviz(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_repoviz");
    Command::new(bin)
        .args(args)
        .env_remove("REPOVIZ_RECORD")
        .output()
        .expect("failed to run repoviz binary")
}

/// Writes a cassette answering `owner/repo` with one output per branch, in order.
fn write_cassette(
    dir: &Path,
    target: &str,
    outputs: Vec<(&str, serde_json::Value)>,
) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join("forge.cassette.yaml");
    let (owner, repo) = target.split_once('/').unwrap();
    let mut recorder = CassetteRecorder::new(&path, "cli-test");
    for (branch, output) in outputs {
        let input = json!({"owner": owner, "repo": repo, "branch": branch});
        recorder.record("forge", "fetch_tree", input, output);
    }
    recorder.finish().unwrap()
}

fn sample_tree() -> serde_json::Value {
    json!({
        "outcome": "found",
        "tree": [
            {"path": "src", "type": "tree"},
            {"path": "src/index.ts", "type": "blob"},
            {"path": "node_modules/x/y.js", "type": "blob"},
            {"path": "dist/bundle.js", "type": "blob"},
            {"path": ".env", "type": "blob"},
            {"path": "README.md", "type": "blob"},
            {"path": "package.json", "type": "blob"}
        ],
        "truncated": false
    })
}

#[test]
fn tree_prints_filtered_paths_from_replay() {
    let dir = std::env::temp_dir().join("repoviz_cli_test_tree");
    let cassette = write_cassette(&dir, "octo/hello", vec![("main", sample_tree())]);

    let output = run_repoviz(&["tree", "octo/hello", "--replay", cassette.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["src/index.ts", "package.json"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tree_json_reports_fallback_branch() {
    let dir = std::env::temp_dir().join("repoviz_cli_test_json");
    let cassette = write_cassette(
        &dir,
        "octo/hello",
        vec![("main", json!({"outcome": "not_found"})), ("master", sample_tree())],
    );

    let output = run_repoviz(&[
        "tree",
        "https://github.com/octo/hello",
        "--json",
        "--replay",
        cassette.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["repository"], "octo/hello");
    assert_eq!(value["branch"], "master");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn not_found_lists_attempted_branches() {
    let dir = std::env::temp_dir().join("repoviz_cli_test_missing");
    let cassette = write_cassette(
        &dir,
        "octo/missing",
        vec![("main", json!({"outcome": "not_found"})), ("master", json!({"outcome": "not_found"}))],
    );

    let output = run_repoviz(&["tree", "octo/missing", "--replay", cassette.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("main, master"));
    assert!(stderr.contains("octo/missing"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rate_limit_is_reported_and_not_retried() {
    let dir = std::env::temp_dir().join("repoviz_cli_test_ratelimit");
    // Only one interaction: a request for master would exhaust the cassette.
    let cassette = write_cassette(
        &dir,
        "octo/hello",
        vec![("main", json!({"outcome": "rate_limited", "status": 403}))],
    );

    let output = run_repoviz(&["tree", "octo/hello", "--replay", cassette.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("rate limit"));
    assert!(!stderr.contains("Cassette exhausted"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn summary_reports_empty_repository() {
    let dir = std::env::temp_dir().join("repoviz_cli_test_empty");
    let cassette = write_cassette(
        &dir,
        "octo/docs",
        vec![("main", json!({"outcome": "found", "tree": [{"path": "README.md", "type": "blob"}]}))],
    );

    let output = run_repoviz(&["summary", "octo/docs", "--replay", cassette.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("No recognised source files"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn summary_prints_counts() {
    let dir = std::env::temp_dir().join("repoviz_cli_test_summary");
    let cassette = write_cassette(&dir, "octo/hello", vec![("main", sample_tree())]);

    let output = run_repoviz(&[
        "summary",
        "octo/hello",
        "--limit",
        "1",
        "--replay",
        cassette.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("octo/hello @ main (2 files)"));
    assert!(stdout.contains("... and 1 more"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_reference_exits_with_error() {
    let output = run_repoviz(&["tree", "https://gitlab.com/a/b"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unsupported host"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_repoviz(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
