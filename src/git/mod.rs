// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git working-copy status.
//!
//! ```text
//!            WipQuery<R: GitRunner>
//!                    |
//!     +--------------+---------------+
//!     |              |               |
//!     v              v               v
//!  runner.rs      diff.rs       reconcile.rs
//!  GitRunner      parse()       reconcile()
//!  (GitProcess)   RawStatusRecord ConflictResolver
//!                    \               /
//!                     v             v
//!                      status.rs
//!             FileStatus  ConflictKind
//!             WorkingCopySnapshot
//! ```

pub mod diff;
pub mod reconcile;
pub mod runner;
pub mod status;
pub mod wip;


pub use status::{ConflictKind, EMPTY_TREE_SHA, FileEntry, FileStatus, WorkingCopySnapshot};
pub use wip::WipQuery;
