// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-copy commands: status, untracked, conflict.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;

use crate::cli::wip::{ConflictArgs, StatusArgs};
use crate::config::Config;
use crate::error::Result;
use crate::git::{WipQuery, WorkingCopySnapshot};

use super::git_process;

/// Prints the working-copy snapshot.
///
/// # Errors
///
/// Returns an error if HEAD cannot be resolved or JSON encoding fails.
pub async fn run_status_command(args: &StatusArgs, config: &Config, dir: &Path) -> Result<()> {
    let query = WipQuery::new(git_process(config, dir));
    let snapshot = query.wip_info().await?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
        println!("{json}");
    } else {
        print!("{}", format_snapshot(&snapshot));
    }
    Ok(())
}

/// Prints untracked paths, one per line.
///
/// # Errors
///
/// Returns an error if `git ls-files` fails.
pub async fn run_untracked_command(config: &Config, dir: &Path) -> Result<()> {
    let query = WipQuery::new(git_process(config, dir));
    for path in query.untracked_files().await? {
        println!("{path}");
    }
    Ok(())
}

/// Prints the conflict sub-kind of one path.
///
/// # Errors
///
/// Returns an error if the per-file query fails or yields nothing.
pub async fn run_conflict_command(args: &ConflictArgs, config: &Config, dir: &Path) -> Result<()> {
    let query = WipQuery::new(git_process(config, dir));
    let kind = query
        .file_status(&args.path)
        .await
        .with_context(|| format!("cannot determine conflict kind of '{}'", args.path))?;
    println!("{kind}");
    Ok(())
}

/// Renders a snapshot as text.
///
/// ```text
/// parent 3f786850e387550fdab836ed7e6dc881de23001b
/// PARTIALLY_CACHED             src/lib.rs
/// UNKNOWN                      notes.txt
/// ```
#[must_use]
pub fn format_snapshot(snapshot: &WorkingCopySnapshot) -> String {
    let mut out = format!("parent {}\n", snapshot.parent_sha);
    let flags: Vec<String> = snapshot
        .files
        .iter()
        .map(|entry| entry.status.to_string())
        .collect();
    let width = flags.iter().map(String::len).max().unwrap_or(0);

    for (entry, flags) in snapshot.files.iter().zip(&flags) {
        let _ = writeln!(out, "{flags:<width$}  {}", entry.path);
    }
    out
}
