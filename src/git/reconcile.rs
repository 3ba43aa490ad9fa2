// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merges the unstaged, staged and untracked sources into one status list.
//!
//! ```text
//! unstaged records --> seed, one entry per path (first record wins);
//!                      U seeds CONFLICT | BOTH_MODIFIED
//! untracked paths  --> append as UNKNOWN, in discovery order
//! staged records   --> refine seeded paths:
//!     CONFLICT              --> CONFLICT + resolver kind (BothModified if unknown)
//!     MODIFIED + IN_INDEX   --> PARTIALLY_CACHED
//!     IN_INDEX              --> IN_INDEX
//! ```
//!
//! Staged-only paths (absent from the unstaged source) are not reported.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use tracing::debug;

use super::diff::RawStatusRecord;
use super::status::{ConflictKind, FileEntry, FileStatus};

/// Resolves the sub-kind of a conflicted path.
pub trait ConflictResolver {
    /// `None` when the kind cannot be determined.
    fn conflict_kind(&self, path: &str) -> impl Future<Output = Option<ConflictKind>> + Send;
}

/// Flags an unstaged record contributes before refinement.
fn seed_status(record: &RawStatusRecord) -> FileStatus {
    let status = record.status().difference(FileStatus::IN_INDEX);
    if status.contains(FileStatus::CONFLICT) {
        // Refined later if the staged report confirms the conflict.
        status | ConflictKind::BothModified.flags()
    } else if status.intersects(FileStatus::MODIFIED | FileStatus::DELETED) {
        status
    } else {
        status | FileStatus::MODIFIED
    }
}

/// Builds the per-path status list.
///
/// Output order is unstaged order followed by untracked order. The same
/// inputs always produce the same output.
pub async fn reconcile<R>(
    unstaged: &[RawStatusRecord],
    staged: &[RawStatusRecord],
    untracked: &[String],
    resolver: &R,
) -> Vec<FileEntry>
where
    R: ConflictResolver + Sync,
{
    let mut files = Vec::with_capacity(unstaged.len() + untracked.len());
    let mut seen = HashSet::new();
    for record in unstaged {
        if seen.insert(record.path()) {
            files.push(FileEntry::new(record.path(), seed_status(record)));
        }
    }
    let tracked = files.len();

    files.extend(
        untracked
            .iter()
            .map(|path| FileEntry::new(path.as_str(), FileStatus::UNKNOWN)),
    );

    let mut staged_by_path: HashMap<&str, FileStatus> = HashMap::with_capacity(staged.len());
    for record in staged {
        staged_by_path
            .entry(record.path())
            .or_insert_with(|| record.status());
    }

    for entry in &mut files[..tracked] {
        let Some(&cached) = staged_by_path.get(entry.path.as_str()) else {
            continue;
        };

        if cached.contains(FileStatus::CONFLICT) {
            let kind = match resolver.conflict_kind(&entry.path).await {
                Some(kind) => kind,
                None => {
                    debug!(path = %entry.path, "conflict kind unknown, assuming both modified");
                    ConflictKind::BothModified
                }
            };
            debug!(path = %entry.path, kind = %kind, "conflict");
            entry.status = FileStatus::CONFLICT | kind.flags();
        } else if cached.contains(FileStatus::MODIFIED | FileStatus::IN_INDEX) {
            entry.status =
                entry.status.difference(FileStatus::MODIFIED) | FileStatus::PARTIALLY_CACHED;
        } else if cached.contains(FileStatus::IN_INDEX) {
            entry.status = entry.status.difference(FileStatus::MODIFIED) | FileStatus::IN_INDEX;
        }
    }

    files
}
