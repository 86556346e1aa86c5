//! Configuration integration tests.
//!
//! Each test writes project config into a temp directory and runs the
//! binary there, checking either `info --json` or the behavior of the
//! command the setting feeds (suggestion policy, input limit, drafts).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TOPICS_RESPONSE: &str = r#"{"response": {"topics": [
    {"label": "Pets", "score": 0.9},
    {"label": "Cats", "score": 0.5},
    {"label": "Dogs", "score": 0.7}
]}}"#;

const SAMPLE: &str = "The cat sat on the mat. The quick brown fox jumps over the lazy dog.";

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap()])
        .args(args)
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// `info --json` from `dir`, narrowed to its `config` object.
fn config_info(dir: &Path) -> Value {
    run_json(dir, &["info", "--json"])["config"].clone()
}

/// Suggested keywords for the saved topics response, run from `dir`.
fn suggested(dir: &Path, extra: &[&str]) -> Value {
    let response = dir.join("response.json");
    fs::write(&response, TOPICS_RESPONSE).unwrap();
    let mut args = vec!["suggest", "--response", response.to_str().unwrap(), "--json"];
    args.extend_from_slice(extra);
    run_json(dir, &args)["keywords"].clone()
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn defaults_apply_without_project_config() {
    let tmp = TempDir::new().unwrap();
    let config = config_info(tmp.path());

    assert!(config["config_file"].is_null());
    assert_eq!(config["min_score"], 0.5);
    assert_eq!(config["max_keywords"], 10);
    assert_eq!(config["max_input_bytes"], 5 * 1024 * 1024);
    assert_eq!(config["extraction_endpoint"], "https://api.textrazor.com/");
    assert_eq!(config["api_key_set"], false);
}

// =============================================================================
// Keyword Policy
// =============================================================================

#[test]
fn project_policy_shapes_suggestions() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(suggested(tmp.path(), &[]), json!(["Pets", "Dogs"]));

    fs::write(
        tmp.path().join(".seo-scribe.toml"),
        "min_score = 0.1\nmax_keywords = 3\n",
    )
    .unwrap();
    assert_eq!(suggested(tmp.path(), &[]), json!(["Pets", "Cats", "Dogs"]));
}

#[test]
fn suggest_flags_beat_project_policy() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("scribe.toml"),
        "min_score = 0.1\nmax_keywords = 3\n",
    )
    .unwrap();

    assert_eq!(suggested(tmp.path(), &["--max", "1"]), json!(["Pets"]));
    assert_eq!(
        suggested(tmp.path(), &["--min-score", "0.8"]),
        json!(["Pets"])
    );
}

#[test]
fn explicit_config_beats_project_min_score() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".seo-scribe.toml"), "min_score = 0.1\n").unwrap();
    let explicit = tmp.path().join("strict.toml");
    fs::write(&explicit, "min_score = 0.8\n").unwrap();

    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["--config", explicit.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["config"]["min_score"], 0.8);
    let reported = info["config"]["config_file"].as_str().unwrap();
    assert!(reported.ends_with("strict.toml"), "reported: {reported}");
}

#[test]
fn env_var_overrides_project_max_keywords() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".seo-scribe.toml"), "max_keywords = 4\n").unwrap();

    let output = cmd()
        .env("SEO_SCRIBE_MAX_KEYWORDS", "7")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["config"]["max_keywords"], 7);
}

// =============================================================================
// Config Names and Discovery
// =============================================================================

#[test]
fn seo_scribe_name_overrides_scribe_name() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".scribe.toml"),
        "min_score = 0.2\nmax_keywords = 2\n",
    )
    .unwrap();
    fs::write(tmp.path().join("seo-scribe.yaml"), "max_keywords: 6\n").unwrap();

    let config = config_info(tmp.path());

    // Both files merge; the seo-scribe name wins where they overlap
    assert_eq!(config["min_score"], 0.2);
    assert_eq!(config["max_keywords"], 6);
    let reported = config["config_file"].as_str().unwrap();
    assert!(reported.ends_with("seo-scribe.yaml"), "reported: {reported}");
}

#[test]
fn only_closest_directory_contributes() {
    let tmp = TempDir::new().unwrap();
    let posts = tmp.path().join("site").join("posts");
    fs::create_dir_all(&posts).unwrap();
    fs::write(tmp.path().join("site").join(".seo-scribe.toml"), "min_score = 0.1\n").unwrap();
    fs::write(posts.join(".scribe.json"), r#"{"max_keywords": 2}"#).unwrap();

    let config = config_info(&posts);

    assert_eq!(config["max_keywords"], 2);
    assert_eq!(config["min_score"], 0.5, "outer config must not merge in");
}

#[test]
fn git_directory_hides_outer_config() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let content = repo.join("content");
    fs::create_dir_all(&content).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".seo-scribe.toml"), "max_keywords = 1\n").unwrap();

    let config = config_info(&content);

    assert!(config["config_file"].is_null());
    assert_eq!(config["max_keywords"], 10);
}

// =============================================================================
// Extraction Service
// =============================================================================

#[test]
fn extraction_table_and_env_api_key() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".seo-scribe.toml"),
        "[extraction]\nendpoint = \"http://localhost:8080/\"\ntimeout_secs = 2\n",
    )
    .unwrap();

    let config = config_info(tmp.path());
    assert_eq!(config["extraction_endpoint"], "http://localhost:8080/");
    assert_eq!(config["api_key_set"], false);

    let output = cmd()
        .env("SEO_SCRIBE_EXTRACTION__API_KEY", "secret")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());
    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["config"]["api_key_set"], true);
    assert_eq!(info["config"]["extraction_endpoint"], "http://localhost:8080/");
}

// =============================================================================
// Input Limit
// =============================================================================

#[test]
fn max_input_bytes_rejects_larger_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".seo-scribe.toml"), "max_input_bytes = 16\n").unwrap();
    let page = tmp.path().join("page.txt");
    fs::write(&page, SAMPLE).unwrap();

    assert_eq!(config_info(tmp.path())["max_input_bytes"], 16);
    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["metrics", page.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn disable_input_limit_accepts_larger_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".seo-scribe.toml"),
        "max_input_bytes = 16\ndisable_input_limit = true\n",
    )
    .unwrap();
    let page = tmp.path().join("page.txt");
    fs::write(&page, SAMPLE).unwrap();

    assert!(config_info(tmp.path())["max_input_bytes"].is_null());
    let report = run_json(tmp.path(), &["metrics", page.to_str().unwrap(), "--json"]);
    assert_eq!(report["total_words"], 15);
}

// =============================================================================
// Drafts
// =============================================================================

#[test]
fn draft_dir_receives_saved_draft() {
    let tmp = TempDir::new().unwrap();
    let drafts = tmp.path().join("drafts");
    fs::write(
        tmp.path().join(".seo-scribe.toml"),
        format!("draft_dir = {:?}\n", drafts.to_str().unwrap()),
    )
    .unwrap();
    let page = tmp.path().join("page.txt");
    fs::write(&page, SAMPLE).unwrap();

    let reported = config_info(tmp.path())["draft_dir"].clone();
    assert_eq!(reported, drafts.to_str().unwrap());

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["draft", "save", page.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(drafts.join("draft.txt")).unwrap(), SAMPLE);
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn wrongly_typed_min_score_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".seo-scribe.toml"), "min_score = \"high\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn malformed_scribe_file_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("scribe.yaml"), "max_keywords: [broken\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}
