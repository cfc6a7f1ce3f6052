use std::io::Write;
use std::process::{Command, Stdio};

mod support;

fn rowscope() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rowscope"))
}

#[test]
fn cli_exits_one_when_any_statement_is_denied() {
    let output = rowscope()
        .arg(support::fixture_path("mixed_queries.sql"))
        .arg("--caller-id")
        .arg("17")
        .output()
        .expect("should run rowscope binary");

    assert_eq!(output.status.code(), Some(1), "got {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("#1 ADMIT tables=[announcements] reason=all tables safe"));
    assert!(stdout.contains(r"#2 ADMIT tables=[messages] reason=ownership column messages.recipient_id ~ messages\.recipient_id"));
    assert!(stdout.contains("#3 DENY tables=[messages] columns=[messages.body]"));
}

#[test]
fn cli_exits_zero_when_everything_is_admitted() {
    let status = rowscope()
        .arg(support::fixture_path("admitted_queries.sql"))
        .status()
        .expect("should run rowscope binary");
    assert_eq!(status.code(), Some(0));
}

#[test]
fn cli_json_output_carries_caller_id() {
    let output = rowscope()
        .arg("--query")
        .arg("SELECT * FROM messages")
        .arg("--format")
        .arg("json")
        .arg("--caller-id")
        .arg("5")
        .output()
        .expect("should run rowscope binary");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value[0]["index"], 1);
    assert_eq!(value[0]["verdict"], "deny");
    assert_eq!(value[0]["caller_id"], 5);
    assert_eq!(value[0]["tables"][0], "messages");
}

#[test]
fn cli_reads_stdin_without_inputs() {
    let mut child = rowscope()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("should spawn rowscope binary");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"SELECT * FROM announcements")
        .expect("should write query");
    let output = child.wait_with_output().expect("should wait for rowscope");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("#1 ADMIT"));
}

#[test]
fn cli_custom_config_changes_the_decision() {
    let status = rowscope()
        .arg("--config")
        .arg(support::fixture_path("school_policy.json"))
        .arg("--query")
        .arg("SELECT * FROM announcements")
        .status()
        .expect("should run rowscope binary");
    assert_eq!(status.code(), Some(1));
}

#[test]
fn cli_reports_invalid_config_with_exit_two() {
    let output = rowscope()
        .arg("--config")
        .arg(support::fixture_path("invalid_pattern.json"))
        .arg("--query")
        .arg("SELECT 1")
        .output()
        .expect("should run rowscope binary");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid ownership pattern"));
}

#[test]
fn cli_parse_error_is_not_double_prefixed() {
    let output = rowscope()
        .arg("--query")
        .arg("not sql")
        .output()
        .expect("should run rowscope binary");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("SQL parse error").count(), 1, "{stderr}");
}
