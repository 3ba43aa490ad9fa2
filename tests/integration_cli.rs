// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use gitwip::cli::{Cli, Command};
use gitwip::cmd::wip::format_snapshot;
use gitwip::git::{FileEntry, FileStatus, WorkingCopySnapshot};

// =============================================================================
// Command selection
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["gitwip", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["gitwip"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["gitwip", "build"]).is_err());
}

#[test]
fn cli_config_commands() {
    let options = Cli::try_parse_from(["gitwip", "options"]).unwrap();
    assert!(matches!(options.command, Some(Command::Options)));

    let inis = Cli::try_parse_from(["gitwip", "-i", "extra.toml", "inis"]).unwrap();
    assert!(matches!(inis.command, Some(Command::Inis)));
    assert_eq!(inis.global.inis.len(), 1);
}

#[test]
fn cli_status_defaults_to_text() {
    let cli = Cli::try_parse_from(["gitwip", "status"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Status(ref args)) if !args.json));
}

#[test]
fn cli_tokenize_command() {
    let cli = Cli::try_parse_from(["gitwip", "tokenize", "git log --format=%s"]).unwrap();
    match cli.command {
        Some(Command::Tokenize(args)) => assert_eq!(args.command, "git log --format=%s"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_exec_requires_command() {
    assert!(Cli::try_parse_from(["gitwip", "exec"]).is_err());
}

#[test]
fn cli_global_options_precede_command() {
    let cli = Cli::try_parse_from(["gitwip", "-C", "/srv/repo", "untracked"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Untracked)));
    assert_eq!(
        cli.global.directory.as_deref(),
        Some(std::path::Path::new("/srv/repo"))
    );
    assert!(Cli::try_parse_from(["gitwip", "untracked", "-C", "/srv/repo"]).is_err());
}

// =============================================================================
// Output formatting
// =============================================================================

#[test]
fn status_text_output() {
    let snapshot = WorkingCopySnapshot {
        parent_sha: "3f786850e387550fdab836ed7e6dc881de23001b".to_string(),
        files: vec![
            FileEntry::new("src/lib.rs", FileStatus::PARTIALLY_CACHED),
            FileEntry::new("added.txt", FileStatus::IN_INDEX | FileStatus::NEW),
            FileEntry::new("notes.txt", FileStatus::UNKNOWN),
        ],
    };

    insta::assert_snapshot!(format_snapshot(&snapshot), @r"
    parent 3f786850e387550fdab836ed7e6dc881de23001b
    PARTIALLY_CACHED  src/lib.rs
    IN_INDEX | NEW    added.txt
    UNKNOWN           notes.txt
    ");
}

#[test]
fn status_json_output() {
    let snapshot = WorkingCopySnapshot {
        parent_sha: gitwip::git::EMPTY_TREE_SHA.to_string(),
        files: vec![FileEntry::new("a b.txt", FileStatus::UNKNOWN)],
    };

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["parent_sha"], gitwip::git::EMPTY_TREE_SHA);
    assert_eq!(json["files"][0]["path"], "a b.txt");
}
