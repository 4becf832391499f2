//! Process-level tests for the `out` binary. None of these reach the network:
//! each one fails before the first API call.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SOURCE: &str = r#""source":{"repository":"acme/widgets","access_token":"t0ken","v3_endpoint":"http://127.0.0.1:9/"}"#;

fn out() -> Command {
    let mut cmd = Command::cargo_bin("out").expect("out binary");
    cmd.env("RUST_LOG", "off");
    cmd
}

#[test]
fn requires_input_dir_argument() {
    out()
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<INPUT_DIR>"));
}

#[test]
fn rejects_malformed_request() {
    let input = TempDir::new().unwrap();
    out()
        .arg(input.path())
        .write_stdin("{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse request"));
}

#[test]
fn rejects_incomplete_source() {
    let input = TempDir::new().unwrap();
    out()
        .arg(input.path())
        .write_stdin(r#"{"source":{"repository":"acme/widgets"},"params":{}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required source field: access_token"));
}

#[test]
fn rejects_unknown_status_before_anything_else() {
    let input = TempDir::new().unwrap();
    out()
        .arg(input.path())
        .write_stdin(format!(r#"{{{SOURCE},"params":{{"path":"pr","status":"finished"}}}}"#))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown status: finished"));
}

#[test]
fn reports_missing_get_step_state() {
    let input = TempDir::new().unwrap();
    out()
        .arg(input.path())
        .write_stdin(format!(r#"{{{SOURCE},"params":{{"path":"pr","status":"success"}}}}"#))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read version"));
}

#[test]
fn echoes_state_when_no_steps_are_configured() {
    let input = TempDir::new().unwrap();
    let state = input.path().join("pr").join(".git").join("resource");
    fs::create_dir_all(&state).unwrap();
    fs::write(state.join("version.json"), r#"{"pr":"8","commit":"abc"}"#).unwrap();
    fs::write(state.join("metadata.json"), r#"[{"name":"author","value":"octocat"}]"#).unwrap();

    out()
        .arg(input.path())
        .write_stdin(format!(r#"{{{SOURCE},"params":{{"path":"pr"}}}}"#))
        .assert()
        .success()
        .stdout(
            "{\"version\":{\"pr\":\"8\",\"commit\":\"abc\"},\"metadata\":[{\"name\":\"author\",\"value\":\"octocat\"}]}\n",
        );
}
