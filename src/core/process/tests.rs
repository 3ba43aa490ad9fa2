// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{Completion, ExecResult, GitProcess, Outcome};
use super::io::OutputBuffer;
use crate::config::settings::{RunnerSettings, SharedSettings};
use crate::error::{ProcessError, TokenizeError};

fn completion(stdout: &str, stderr: &str) -> Completion {
    Completion {
        exit_code: Some(0),
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        canceled: false,
    }
}

// --- classification ---

#[test]
fn test_fatal_marker_replaces_payload_with_stderr() {
    let result = ExecResult::classify(completion(
        "partial listing\n",
        "fatal: repository not found\n",
    ));
    assert_eq!(result.outcome(), Outcome::Failed);
    assert!(!result.success());
    assert_eq!(result.output(), "fatal: repository not found\n");
}

#[test]
fn test_markers_are_case_insensitive() {
    for stderr in ["ERROR: denied", "Fatal: bad object", "Could not read Username for x"] {
        let result = ExecResult::classify(completion("", stderr));
        assert_eq!(result.outcome(), Outcome::Failed, "{stderr}");
    }
}

#[test]
fn test_fatal_needs_trailing_space() {
    let result = ExecResult::classify(completion("ok\n", "fatal:no-space\n"));
    assert!(result.success());
}

#[test]
fn test_success_concatenates_stdout_then_stderr() {
    let result = ExecResult::classify(completion("abc\ndef\n", "Switched to branch 'main'\n"));
    assert!(result.success());
    insta::assert_snapshot!(result.output(), @r"
    abc
    def
    Switched to branch 'main'
    ");
}

#[test]
fn test_nonzero_exit_without_markers_succeeds() {
    let result = ExecResult::classify(Completion {
        exit_code: Some(1),
        ..completion("diff output\n", "")
    });
    assert!(result.success());
    assert_eq!(result.exit_code(), Some(1));
}

#[test]
fn test_abnormal_exit_fails() {
    let result = ExecResult::classify(Completion {
        exit_code: None,
        ..completion("half", "killed")
    });
    assert_eq!(result.outcome(), Outcome::Failed);
    assert_eq!(result.output(), "killed");
}

#[test]
fn test_failure_with_empty_stderr_keeps_stdout() {
    let result = ExecResult::classify(Completion {
        exit_code: None,
        ..completion("what we had", "")
    });
    assert_eq!(result.outcome(), Outcome::Failed);
    assert_eq!(result.output(), "what we had");
}

#[test]
fn test_cancellation_wins_over_success() {
    let result = ExecResult::classify(Completion {
        canceled: true,
        ..completion("out", "")
    });
    assert_eq!(result.outcome(), Outcome::Canceled);
    assert!(result.is_canceled());
    assert!(!result.success());
}

#[test]
fn test_outcome_display() {
    let names: Vec<String> = [Outcome::Succeeded, Outcome::Failed, Outcome::Canceled]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, ["succeeded", "failed", "canceled"]);
}

#[test]
fn test_output_buffer_appends_in_order() {
    let mut buffer = OutputBuffer::new();
    buffer.append(b"one ");
    buffer.append(b"");
    buffer.append(b"two");
    assert_eq!(buffer.chunk_count(), 2);
    assert_eq!(buffer.len(), 7);
    assert_eq!(buffer.into_string(), "one two");
}

#[test]
fn test_output_buffer_replaces_invalid_utf8() {
    let mut buffer = OutputBuffer::new();
    buffer.append(b"a\xffb");
    assert_eq!(buffer.into_string(), "a\u{fffd}b");
}

// --- preparation ---

#[test]
fn test_prepare_empty_command() {
    let temp = tempfile::tempdir().unwrap();
    let process = GitProcess::new(temp.path(), SharedSettings::default());
    let err = process.prepare("   ").unwrap_err();
    assert!(matches!(err, ProcessError::Tokenize(TokenizeError::Empty)));
}

#[test]
fn test_prepare_unknown_program() {
    let temp = tempfile::tempdir().unwrap();
    let process = GitProcess::new(temp.path(), SharedSettings::default());
    let err = process.prepare("nonexistent_program_12345 status").unwrap_err();
    assert!(
        matches!(err, ProcessError::ExecutableNotFound { ref name } if name == "nonexistent_program_12345")
    );
}

#[cfg(unix)]
#[test]
fn test_prepare_binary_override_replaces_program() {
    let temp = tempfile::tempdir().unwrap();
    let settings = SharedSettings::new(RunnerSettings::new().with_binary("sh"));
    let process = GitProcess::new(temp.path(), settings);

    let prepared = process.prepare("git -c \"echo hi\"").unwrap();
    assert_eq!(prepared.argv().as_slice(), ["sh", "-c", "echo hi"]);
    assert_eq!(prepared.args(), ["-c", "echo hi"]);
    assert!(prepared.program().ends_with("sh"));
}

#[cfg(unix)]
#[test]
fn test_prepare_reads_settings_per_call() {
    let temp = tempfile::tempdir().unwrap();
    let settings = SharedSettings::default();
    let process = GitProcess::new(temp.path(), settings.clone());

    assert!(process.prepare("sh -c true").unwrap().kill_after().is_none());

    settings.replace(RunnerSettings::new().with_kill_after(std::time::Duration::from_secs(1)));
    assert!(process.prepare("sh -c true").unwrap().kill_after().is_some());
}

#[cfg(unix)]
#[test]
fn test_prepare_builds_tool_env() {
    let temp = tempfile::tempdir().unwrap();
    let process = GitProcess::new(temp.path(), SharedSettings::default());
    let prepared = process.prepare("sh").unwrap();
    assert_eq!(prepared.env().get("GIT_TERMINAL_PROMPT"), Some("0"));
    assert_eq!(prepared.env().get("GIT_TRACE"), Some("0"));
}

// --- execution ---

#[cfg(unix)]
mod unix {
    use super::*;
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;

    fn process_in(dir: &std::path::Path) -> GitProcess {
        GitProcess::new(dir, SharedSettings::default())
    }

    #[tokio::test]
    async fn test_run_echo() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path()).run("echo hello").await;
        assert!(result.success());
        assert_eq!(result.exit_code(), Some(0));
        assert_eq!(result.output(), "hello\n");
    }

    #[tokio::test]
    async fn test_run_in_working_dir() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();
        let result = process_in(temp.path()).run("ls").await;
        assert!(result.output().contains("marker.txt"));
    }

    #[tokio::test]
    async fn test_run_success_includes_stderr() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path())
            .run("sh -c \"echo out; echo info >&2\"")
            .await;
        assert!(result.success());
        assert_eq!(result.output(), "out\ninfo\n");
    }

    #[tokio::test]
    async fn test_run_fatal_stderr_fails() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path())
            .run("sh -c \"echo out; echo 'fatal: repository not found' >&2\"")
            .await;
        assert_eq!(result.outcome(), Outcome::Failed);
        assert_eq!(result.output(), "fatal: repository not found\n");
    }

    #[tokio::test]
    async fn test_run_exit_code_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path()).run("sh -c \"exit 3\"").await;
        assert_eq!(result.exit_code(), Some(3));
        assert!(result.success());
    }

    #[tokio::test]
    async fn test_spawned_env_has_git_variables() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path()).run("env").await;
        assert!(result.output().lines().any(|l| l == "GIT_TERMINAL_PROMPT=0"));
        assert!(result.output().lines().any(|l| l == "GIT_FLUSH=0"));
    }

    #[tokio::test]
    async fn test_run_start_failure_is_failed_result() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path()).run("nonexistent_program_12345").await;
        assert_eq!(result.outcome(), Outcome::Failed);
        assert_eq!(result.exit_code(), None);
        assert!(result.output().contains("nonexistent_program_12345"));
    }

    #[tokio::test]
    async fn test_run_tokenize_failure_is_failed_result() {
        let temp = tempfile::tempdir().unwrap();
        let result = process_in(temp.path())
            .run("echo \"#%&!?\"")
            .await;
        assert_eq!(result.outcome(), Outcome::Failed);
        assert!(result.output().starts_with("cannot start"), "{}", result.output());
    }

    #[tokio::test]
    async fn test_cancel_waits_and_drops_late_output() {
        let temp = tempfile::tempdir().unwrap();
        let running = process_in(temp.path())
            .execute("sh -c \"sleep 0.3; echo late\"")
            .unwrap();
        assert!(running.pid().is_some());

        let result = running.cancel().await;
        assert_eq!(result.outcome(), Outcome::Canceled);
        assert!(!result.output().contains("late"));
    }

    #[tokio::test]
    async fn test_cancel_with_kill_grace() {
        let temp = tempfile::tempdir().unwrap();
        let settings =
            SharedSettings::new(RunnerSettings::new().with_kill_after(Duration::from_millis(50)));
        let running = GitProcess::new(temp.path(), settings)
            .execute("sleep 30")
            .unwrap();

        let started = Instant::now();
        let result = running.cancel().await;
        assert!(result.is_canceled());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_external_token_cancels() {
        let temp = tempfile::tempdir().unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let result = process_in(temp.path())
            .execute_with_cancellation("echo hello", token)
            .unwrap()
            .wait()
            .await;
        assert!(result.is_canceled());
    }

    #[tokio::test]
    async fn test_subscribe_receives_chunks() {
        let temp = tempfile::tempdir().unwrap();
        let running = process_in(temp.path())
            .execute("sh -c \"sleep 0.2; echo chunk\"")
            .unwrap();
        let mut chunks = running.subscribe();

        let result = running.wait().await;
        assert!(result.success());
        assert_eq!(chunks.recv().await.unwrap(), "chunk\n");
    }
}
