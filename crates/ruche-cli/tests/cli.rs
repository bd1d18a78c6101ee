use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ruche"));
    cmd.env_remove("INFLUX_URL").env_remove("RUST_LOG");
    cmd
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_request(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("request.json")
}

#[test]
fn payload_decode_prints_fields() {
    let assert = cmd()
        .arg("payload")
        .arg("decode")
        .arg("002008301100003a01150038f010e8044340e8")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["format"], "hive-binary-v2");
    assert_eq!(value["bytes"], 19);
    assert_eq!(value["fields"].as_array().expect("fields").len(), 10);
    assert_eq!(value["fields"][1]["name"], "temp");
    assert_eq!(value["fields"][1]["value"], 20.8);
}

#[test]
fn payload_decode_restart() {
    let assert = cmd()
        .arg("payload")
        .arg("decode")
        .arg("52657374617274")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["format"], "restart");
}

#[test]
fn payload_decode_invalid_hex_shows_error_and_hint() {
    cmd()
        .arg("payload")
        .arg("decode")
        .arg("abc")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn payload_decode_unknown_format() {
    cmd()
        .arg("payload")
        .arg("decode")
        .arg("00".repeat(12))
        .assert()
        .failure()
        .stderr(contains("unknown payload format"));
}

#[test]
fn replay_requires_a_target() {
    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(golden_request("binary_v2"))
        .assert()
        .failure();
}

#[test]
fn replay_stdout_outputs_line_protocol() {
    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(golden_request("binary_v2"))
        .arg("--stdout")
        .assert()
        .success()
        .stdout(
            contains("raw,location_provider=network,model=ruche-v2,rucher_id=0,stream_id=8a1f02 ")
                .and(contains("temp=20.8"))
                .and(contains(" 1714557600")),
        );
}

#[test]
fn replay_json_outputs_outcomes() {
    let assert = cmd()
        .arg("webhook")
        .arg("replay")
        .arg(golden_request("restart"))
        .arg("--stdout")
        .arg("--json")
        .assert()
        .success()
        .stderr(contains("skipped restart"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value, serde_json::json!([{ "outcome": "restart" }]));
}

#[test]
fn replay_glob_processes_every_match() {
    let temp = TempDir::new().expect("tempdir");
    for case in ["binary_v2", "ascii_v1_full", "restart"] {
        std::fs::copy(golden_request(case), temp.path().join(format!("{case}.json")))
            .expect("copy fixture");
    }
    let output = temp.path().join("out").join("points.lp");
    let pattern = temp.path().join("*.json");

    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(pattern)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK:"));

    let text = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn replay_quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("points.lp");

    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(golden_request("legacy_value"))
        .arg("-o")
        .arg(output)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn replay_missing_input_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(temp.path().join("missing.json"))
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn replay_invalid_body_fails() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("body.json");
    std::fs::write(&input, "{\"streamId\": 1}").expect("write body");

    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(input)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("invalid webhook body"));
}

#[test]
fn replay_rejects_bad_influx_url() {
    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(golden_request("binary_v2"))
        .arg("--influx-url")
        .arg("localhost:8086")
        .assert()
        .failure()
        .stderr(contains("http://"));
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("webhook")
        .arg("replay")
        .arg(golden_request("binary_v2"))
        .arg("--stdout")
        .arg("-o")
        .arg(temp.path().join("points.lp"))
        .assert()
        .failure()
        .stderr(contains("error:"));
}
