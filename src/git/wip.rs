// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-copy ("WIP") query pipeline.
//!
//! ```text
//! wip_info()
//!   git rev-parse --revs-only HEAD          --> parent sha (empty --> EMPTY_TREE_SHA)
//!   git update-index --refresh              (result ignored)
//!   git diff-index <sha>                    --> unstaged records
//!   git diff-index --cached <sha>           --> staged records
//!   git ls-files --others --exclude-standard --> untracked paths
//!   reconcile(...)
//!     git diff-files --raw -c <path>        per conflicted path
//!   --> WorkingCopySnapshot
//! ```
//!
//! A failed diff or listing query contributes nothing; only an unresolvable
//! HEAD fails the whole query.

use tracing::{debug, trace, warn};

use super::diff::{self, RawStatusRecord, unquote};
use super::reconcile::{ConflictResolver, reconcile};
use super::runner::GitRunner;
use super::status::{ConflictKind, EMPTY_TREE_SHA, WorkingCopySnapshot};
use crate::error::{GitError, WipResult};

const REV_PARSE_HEAD: &str = "git rev-parse --revs-only HEAD";
const REFRESH_INDEX: &str = "git update-index --refresh";
const LIST_UNTRACKED: &str = "git ls-files --others --exclude-standard";

/// Status queries for one working copy.
#[derive(Debug, Clone)]
pub struct WipQuery<R> {
    runner: R,
}

impl<R> WipQuery<R>
where
    R: GitRunner + Sync,
{
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Untracked, non-ignored paths in the order git lists them.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if `git ls-files` fails.
    pub async fn untracked_files(&self) -> WipResult<Vec<String>> {
        let result = self.runner.run(LIST_UNTRACKED).await;
        if !result.success() {
            return Err(GitError::CommandFailed {
                command: LIST_UNTRACKED.to_string(),
                message: result.output().trim().to_string(),
            }
            .into());
        }

        Ok(result
            .output()
            .lines()
            .filter(|line| !line.is_empty())
            .map(unquote)
            .collect())
    }

    /// Resolves HEAD, or [`EMPTY_TREE_SHA`] when there are no commits yet.
    ///
    /// # Errors
    ///
    /// Returns `GitError::HeadUnresolved` if `git rev-parse` fails, e.g.
    /// outside a repository.
    pub async fn resolve_head(&self) -> WipResult<String> {
        let result = self.runner.run(REV_PARSE_HEAD).await;
        if !result.success() {
            return Err(GitError::HeadUnresolved {
                message: result.output().trim().to_string(),
            }
            .into());
        }

        let sha = result.output().trim();
        if sha.is_empty() {
            debug!("no commits yet, diffing against the empty tree");
            Ok(EMPTY_TREE_SHA.to_string())
        } else {
            Ok(sha.to_string())
        }
    }

    /// Runs the per-file combined diff used to classify a conflict.
    ///
    /// `None` if the query fails.
    pub async fn query_file_status(&self, path: &str) -> Option<Vec<RawStatusRecord>> {
        let command = format!("git diff-files --raw -c {}", quote_arg(path));
        let result = self.runner.run(&command).await;
        if !result.success() {
            warn!(path, output = %result.output().trim(), "per-file status query failed");
            return None;
        }
        Some(diff::parse(result.output(), false))
    }

    /// Conflict sub-kind of `path`, or `None` when it cannot be determined.
    pub async fn file_status(&self, path: &str) -> Option<ConflictKind> {
        let records = self.query_file_status(path).await?;
        let kind = ConflictKind::from_query_output(&records);
        trace!(path, records = records.len(), kind = ?kind, "conflict query");
        kind
    }

    /// Builds a fresh snapshot of the working copy.
    ///
    /// # Errors
    ///
    /// Returns `GitError::HeadUnresolved` if HEAD cannot be resolved.
    pub async fn wip_info(&self) -> WipResult<WorkingCopySnapshot> {
        let parent_sha = self.resolve_head().await?;

        let refresh = self.runner.run(REFRESH_INDEX).await;
        trace!(outcome = %refresh.outcome(), "index refreshed");

        let unstaged = self.diff_index(&format!("git diff-index {parent_sha}"), false).await;
        let staged = self
            .diff_index(&format!("git diff-index --cached {parent_sha}"), true)
            .await;

        let untracked = self.untracked_files().await.unwrap_or_else(|e| {
            warn!(error = %e, "listing untracked files failed");
            Vec::new()
        });

        let files = reconcile(&unstaged, &staged, &untracked, self).await;
        debug!(
            parent = %parent_sha,
            unstaged = unstaged.len(),
            staged = staged.len(),
            untracked = untracked.len(),
            files = files.len(),
            "working copy"
        );

        Ok(WorkingCopySnapshot { parent_sha, files })
    }

    async fn diff_index(&self, command: &str, cached: bool) -> Vec<RawStatusRecord> {
        let result = self.runner.run(command).await;
        if result.success() {
            diff::parse(result.output(), cached)
        } else {
            warn!(cmd = %command, output = %result.output().trim(), "diff query failed");
            Vec::new()
        }
    }
}

impl<R> ConflictResolver for WipQuery<R>
where
    R: GitRunner + Sync,
{
    async fn conflict_kind(&self, path: &str) -> Option<ConflictKind> {
        self.file_status(path).await
    }
}

/// Double-quotes `arg` when it contains whitespace.
fn quote_arg(arg: &str) -> String {
    if arg.chars().any(char::is_whitespace) {
        format!("\"{arg}\"")
    } else {
        arg.to_string()
    }
}
