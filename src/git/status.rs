// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-file status flags and the working-copy snapshot.
//!
//! ```text
//! FileStatus (bitset)
//!   base:        MODIFIED  IN_INDEX  PARTIALLY_CACHED  UNKNOWN
//!   conflict:    CONFLICT + one of BOTH_MODIFIED | DELETED_BY_THEM | DELETED_BY_US
//!   refinement:  DELETED  NEW  RENAMED  COPIED
//!
//! WorkingCopySnapshot { parent_sha, files: [FileEntry { path, status }] }
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::diff::RawStatusRecord;

/// Parent id used when HEAD has no commits: git's empty tree.
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

bitflags! {
    /// Semantic status of one working-copy path.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FileStatus: u16 {
        const MODIFIED = 1 << 0;
        /// Staged.
        const IN_INDEX = 1 << 1;
        /// Staged, with further changes in the worktree.
        const PARTIALLY_CACHED = 1 << 2;
        /// Untracked.
        const UNKNOWN = 1 << 3;
        const CONFLICT = 1 << 4;
        const DELETED = 1 << 5;
        const BOTH_MODIFIED = 1 << 6;
        const DELETED_BY_THEM = 1 << 7;
        const DELETED_BY_US = 1 << 8;
        const NEW = 1 << 9;
        const RENAMED = 1 << 10;
        const COPIED = 1 << 11;

        /// Exactly one of these accompanies CONFLICT.
        const CONFLICT_KINDS = Self::BOTH_MODIFIED.bits()
            | Self::DELETED_BY_THEM.bits()
            | Self::DELETED_BY_US.bits();
    }
}

impl FileStatus {
    /// The conflict sub-kind, if the path is conflicted.
    #[must_use]
    pub const fn conflict_kind(self) -> Option<ConflictKind> {
        if !self.contains(Self::CONFLICT) {
            return None;
        }
        if self.contains(Self::DELETED_BY_THEM) {
            Some(ConflictKind::DeletedByThem)
        } else if self.contains(Self::DELETED_BY_US) {
            Some(ConflictKind::DeletedByUs)
        } else {
            Some(ConflictKind::BothModified)
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        bitflags::parser::to_writer(self, f)
    }
}

/// How a conflicted path diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    BothModified,
    DeletedByThem,
    DeletedByUs,
}

impl ConflictKind {
    /// Classifies the records of a per-file `diff-files --raw -c` query.
    ///
    /// ```text
    /// > 1 record                    --> DeletedByThem
    /// 1 record, 2-letter status     --> BothModified
    /// 1 record, otherwise           --> DeletedByUs
    /// no records                    --> None
    /// ```
    #[must_use]
    pub fn from_query_output(records: &[RawStatusRecord]) -> Option<Self> {
        match records {
            [] => None,
            [single] if single.status_field().chars().count() == 2 => Some(Self::BothModified),
            [_] => Some(Self::DeletedByUs),
            _ => Some(Self::DeletedByThem),
        }
    }

    /// Flags recorded on the path next to CONFLICT.
    #[must_use]
    pub const fn flags(self) -> FileStatus {
        match self {
            Self::BothModified => FileStatus::BOTH_MODIFIED,
            Self::DeletedByThem => FileStatus::DELETED_BY_THEM.union(FileStatus::DELETED),
            Self::DeletedByUs => FileStatus::DELETED_BY_US.union(FileStatus::DELETED),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BothModified => "both modified",
            Self::DeletedByThem => "deleted by them",
            Self::DeletedByUs => "deleted by us",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One path and its accumulated status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub status: FileStatus,
}

impl FileEntry {
    #[must_use]
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Working-copy state against the resolved parent commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingCopySnapshot {
    /// HEAD commit id, or [`EMPTY_TREE_SHA`] for a repository without commits.
    pub parent_sha: String,
    pub files: Vec<FileEntry>,
}

impl WorkingCopySnapshot {
    /// True when HEAD had no commits.
    #[must_use]
    pub fn is_empty_repository(&self) -> bool {
        self.parent_sha == EMPTY_TREE_SHA
    }

    /// Status of `path`, if it is part of the snapshot.
    #[must_use]
    pub fn status_of(&self, path: &str) -> Option<FileStatus> {
        self.files
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.status)
    }

    /// Paths carrying any of `flags`, in snapshot order.
    pub fn paths_with(&self, flags: FileStatus) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(move |entry| entry.status.intersects(flags))
            .map(|entry| entry.path.as_str())
    }
}
