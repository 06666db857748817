#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use agent_adapter::{AdapterConfig, AgentAdapter, AskRequest, HistoryEntry};
use agent_adapter_cli::{ClaudeAdapter, CodexAdapter, GeminiAdapter};
use pretty_assertions::assert_eq;
use serde_json::json;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut permissions = std::fs::metadata(&path).expect("metadata").permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("chmod");
    path
}

fn config_for(command: &Path) -> AdapterConfig {
    AdapterConfig::default()
        .with("command", command.display().to_string())
        .with("args", json!(["--auto"]))
}

#[test]
fn claude_script_sees_flags_and_stdin() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Echoes the received argv and stdin back through the result field.
    let script = write_script(
        dir.path(),
        "claude",
        r#"input=$(cat)
printf '{"result":"%s|%s","session_id":"s-1","is_error":false}' "$*" "$input""#,
    );

    let result = ClaudeAdapter::new(&config_for(&script))
        .ask(AskRequest::new("hello").with_session_id(Some("s-0".to_string())));

    assert_eq!(result.error, None);
    assert_eq!(
        result.response.as_deref(),
        Some("--auto -p --output-format json --resume s-0|hello")
    );
    assert_eq!(result.session_id.as_deref(), Some("s-1"));
}

#[test]
fn codex_script_events_are_parsed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        "codex",
        r#"cat >/dev/null
echo '{"type":"thread.started","thread_id":"th-9"}'
echo '{"type":"item.completed","item":{"type":"agent_message","text":"done"}}'"#,
    );

    let result = CodexAdapter::new(&config_for(&script)).ask(AskRequest::new("go"));

    assert_eq!(result.response.as_deref(), Some("done"));
    assert_eq!(result.session_id.as_deref(), Some("th-9"));
}

#[test]
fn gemini_script_receives_transcript() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        "gemini",
        r#"lines=$(wc -l | tr -d ' ')
printf '{"response":"lines=%s"}' "$lines""#,
    );

    let result = GeminiAdapter::new(&config_for(&script)).ask(
        AskRequest::new("third").with_history(vec![
            HistoryEntry::user("first"),
            HistoryEntry::assistant("second"),
        ]),
    );

    // "User: first", "", "Assistant: second", "", "User: third" has four newlines.
    assert_eq!(result.response.as_deref(), Some("lines=4"));
    assert_eq!(result.session_id, None);
}

#[test]
fn failing_script_reports_exit_code_and_stderr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(dir.path(), "claude", "cat >/dev/null\necho 'not logged in' >&2\nexit 3");

    let result = ClaudeAdapter::new(&config_for(&script)).ask(AskRequest::new("hi"));

    assert_eq!(result.response, None);
    assert_eq!(
        result.error.as_deref(),
        Some("Claude failed with exit code 3: not logged in")
    );
}

#[test]
fn missing_command_is_a_launch_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("no-such-codex");

    let result = CodexAdapter::new(&config_for(&missing)).ask(AskRequest::new("hi"));

    assert_eq!(
        result.error,
        Some(format!("{} not found. Is codex installed?", missing.display()))
    );
}
