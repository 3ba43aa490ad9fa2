// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the status pipeline.
//!
//! Runs the real git CLI against temporary repositories.

use gitwip::config::settings::{RunnerSettings, SharedSettings};
use gitwip::core::process::{GitProcess, Outcome};
use gitwip::git::{ConflictKind, EMPTY_TREE_SHA, FileStatus, WipQuery};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .expect("failed to run git")
}

/// Runs git and asserts that it succeeded.
fn run_git(args: &[&str], cwd: &Path) {
    let output = git(args, cwd);
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_test_repo(dir: &Path) {
    run_git(&["init", "-q"], dir);
    run_git(&["config", "user.email", "test@test.com"], dir);
    run_git(&["config", "user.name", "Test"], dir);
    run_git(&["config", "core.autocrlf", "false"], dir);
}

fn commit_all(dir: &Path, message: &str) {
    run_git(&["add", "-A"], dir);
    run_git(&["commit", "-q", "-m", message], dir);
}

fn current_branch(dir: &Path) -> String {
    let output = git(&["rev-parse", "--abbrev-ref", "HEAD"], dir);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn head_sha(dir: &Path) -> String {
    let output = git(&["rev-parse", "HEAD"], dir);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn query(dir: &Path) -> WipQuery<GitProcess> {
    WipQuery::new(git_process(dir))
}

fn git_process(dir: &Path) -> GitProcess {
    GitProcess::new(dir, SharedSettings::new(RunnerSettings::default()))
}

// =============================================================================
// Snapshots
// =============================================================================

#[tokio::test]
async fn wip_empty_repository_lists_untracked_files() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    fs::write(temp.path().join("b.txt"), "b").unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();

    let snapshot = query(temp.path()).wip_info().await.unwrap();

    assert_eq!(snapshot.parent_sha, EMPTY_TREE_SHA);
    assert!(snapshot.is_empty_repository());
    let paths: Vec<_> = snapshot.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["a.txt", "b.txt"]);
    assert!(
        snapshot
            .files
            .iter()
            .all(|f| f.status == FileStatus::UNKNOWN)
    );
}

#[tokio::test]
async fn wip_clean_repository_is_empty() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    fs::write(temp.path().join("README.md"), "# Test").unwrap();
    commit_all(temp.path(), "initial");

    let snapshot = query(temp.path()).wip_info().await.unwrap();

    assert_eq!(snapshot.parent_sha, head_sha(temp.path()));
    assert!(!snapshot.is_empty_repository());
    assert!(snapshot.files.is_empty());
}

#[tokio::test]
async fn wip_mixed_working_copy() {
    let temp = temp_dir();
    let dir = temp.path();
    init_test_repo(dir);
    fs::write(dir.join(".gitignore"), "*.log\n").unwrap();
    fs::write(dir.join("tracked.txt"), "one\n").unwrap();
    fs::write(dir.join("other.txt"), "one\n").unwrap();
    fs::write(dir.join("gone.txt"), "one\n").unwrap();
    commit_all(dir, "initial");

    fs::write(dir.join("tracked.txt"), "two\n").unwrap();
    fs::write(dir.join("other.txt"), "two\n").unwrap();
    run_git(&["add", "other.txt"], dir);
    fs::remove_file(dir.join("gone.txt")).unwrap();
    fs::write(dir.join("added.txt"), "new\n").unwrap();
    run_git(&["add", "added.txt"], dir);
    fs::write(dir.join("notes.txt"), "scratch\n").unwrap();
    fs::write(dir.join("debug.log"), "ignored\n").unwrap();

    let snapshot = query(dir).wip_info().await.unwrap();

    let files: Vec<_> = snapshot
        .files
        .iter()
        .map(|f| (f.path.as_str(), f.status))
        .collect();
    assert_eq!(
        files,
        [
            ("added.txt", FileStatus::IN_INDEX | FileStatus::NEW),
            ("gone.txt", FileStatus::DELETED),
            ("other.txt", FileStatus::PARTIALLY_CACHED),
            ("tracked.txt", FileStatus::MODIFIED),
            ("notes.txt", FileStatus::UNKNOWN),
        ]
    );
}

#[tokio::test]
async fn wip_path_with_spaces() {
    let temp = temp_dir();
    let dir = temp.path();
    init_test_repo(dir);
    fs::write(dir.join("my notes.txt"), "one\n").unwrap();
    commit_all(dir, "initial");
    fs::write(dir.join("my notes.txt"), "two\n").unwrap();

    let snapshot = query(dir).wip_info().await.unwrap();

    assert_eq!(snapshot.status_of("my notes.txt"), Some(FileStatus::MODIFIED));
}

#[tokio::test]
async fn wip_merge_conflict() {
    let temp = temp_dir();
    let dir = temp.path();
    init_test_repo(dir);
    fs::write(dir.join("shared.txt"), "base\n").unwrap();
    commit_all(dir, "base");
    let main = current_branch(dir);

    run_git(&["checkout", "-q", "-b", "feature"], dir);
    fs::write(dir.join("shared.txt"), "feature\n").unwrap();
    commit_all(dir, "feature");

    run_git(&["checkout", "-q", &main], dir);
    fs::write(dir.join("shared.txt"), "main\n").unwrap();
    commit_all(dir, "main");

    let merge = git(&["merge", "feature"], dir);
    assert!(!merge.status.success(), "merge should conflict");

    let query = query(dir);
    let snapshot = query.wip_info().await.unwrap();

    assert_eq!(
        snapshot.status_of("shared.txt"),
        Some(FileStatus::CONFLICT | FileStatus::BOTH_MODIFIED)
    );
    assert_eq!(
        query.file_status("shared.txt").await,
        Some(ConflictKind::BothModified)
    );
}

#[tokio::test]
async fn wip_modify_delete_conflicts() {
    let temp = temp_dir();
    let dir = temp.path();
    init_test_repo(dir);
    fs::write(dir.join("kept_here.txt"), "base\n").unwrap();
    fs::write(dir.join("kept_there.txt"), "base\n").unwrap();
    commit_all(dir, "base");
    let main = current_branch(dir);

    // feature deletes what main edits, and edits what main deletes
    run_git(&["checkout", "-q", "-b", "feature"], dir);
    run_git(&["rm", "-q", "kept_here.txt"], dir);
    fs::write(dir.join("kept_there.txt"), "feature\n").unwrap();
    commit_all(dir, "feature");

    run_git(&["checkout", "-q", &main], dir);
    fs::write(dir.join("kept_here.txt"), "main\n").unwrap();
    run_git(&["rm", "-q", "kept_there.txt"], dir);
    commit_all(dir, "main");

    let merge = git(&["merge", "feature"], dir);
    assert!(!merge.status.success(), "merge should conflict");

    let query = query(dir);
    let snapshot = query.wip_info().await.unwrap();

    assert_eq!(
        snapshot.status_of("kept_here.txt"),
        Some(FileStatus::CONFLICT | FileStatus::DELETED_BY_THEM | FileStatus::DELETED)
    );
    assert_eq!(
        snapshot.status_of("kept_there.txt"),
        Some(FileStatus::CONFLICT | FileStatus::DELETED_BY_US | FileStatus::DELETED)
    );
    assert_eq!(
        query.file_status("kept_here.txt").await,
        Some(ConflictKind::DeletedByThem)
    );
    assert_eq!(
        query.file_status("kept_there.txt").await,
        Some(ConflictKind::DeletedByUs)
    );
}

#[tokio::test]
async fn wip_outside_repository_fails() {
    let temp = temp_dir();

    let result = query(temp.path()).wip_info().await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("cannot resolve HEAD"), "{err}");
}

// =============================================================================
// Process runner
// =============================================================================

#[tokio::test]
async fn exec_rev_parse_inside_repository() {
    let temp = temp_dir();
    init_test_repo(temp.path());

    let result = git_process(temp.path())
        .run("git rev-parse --is-inside-work-tree")
        .await;

    assert_eq!(result.outcome(), Outcome::Succeeded);
    assert_eq!(result.output().trim(), "true");
    assert_eq!(result.exit_code(), Some(0));
}

#[tokio::test]
async fn exec_rev_parse_outside_repository_fails() {
    let temp = temp_dir();

    let result = git_process(temp.path()).run("git rev-parse HEAD").await;

    assert_eq!(result.outcome(), Outcome::Failed);
    assert!(result.output().contains("fatal"), "{}", result.output());
}

#[tokio::test]
async fn exec_quoted_commit_message() {
    let temp = temp_dir();
    let dir = temp.path();
    init_test_repo(dir);
    fs::write(dir.join("README.md"), "# Test").unwrap();
    run_git(&["add", "README.md"], dir);

    let process = git_process(dir);
    let commit = process.run(r#"git commit -q -m "fix: a b c""#).await;
    assert!(commit.success(), "{}", commit.output());

    let log = process.run("git log -1 --format=%s").await;
    assert_eq!(log.output().trim(), "fix: a b c");
}
