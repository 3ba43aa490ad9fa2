// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for raw diff reports (`diff-index`, `diff-files --raw`).
//!
//! ```text
//! :100644 100644 <old> <new> M\tpath
//! :100644 100644 <old> <new> R086\told\tnew
//! ::100644 100644 100644 <p1> <p2> <new> MM\tpath     (combined, 2 parents)
//! |      |                             |     |
//! colons modes + ids                 status  tab-separated path(s)
//! ```
//!
//! Lines that do not start with `:` are ignored. Malformed lines are skipped.

use bitflags::bitflags;
use tracing::trace;

use super::status::FileStatus;

bitflags! {
    /// Change letters seen in a status field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChangeFlags: u8 {
        /// `A`
        const ADDED = 1 << 0;
        /// `M`, and any letter git may add later
        const MODIFIED = 1 << 1;
        /// `D`
        const DELETED = 1 << 2;
        /// `C`
        const COPIED = 1 << 3;
        /// `R`
        const RENAMED = 1 << 4;
        /// `U`
        const UNMERGED = 1 << 5;
        /// `T`
        const TYPE_CHANGED = 1 << 6;
    }
}

impl ChangeFlags {
    const fn from_letter(letter: char) -> Self {
        match letter {
            'A' => Self::ADDED,
            'D' => Self::DELETED,
            'C' => Self::COPIED,
            'R' => Self::RENAMED,
            'U' => Self::UNMERGED,
            'T' => Self::TYPE_CHANGED,
            _ => Self::MODIFIED,
        }
    }
}

/// One parsed line of a diff report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatusRecord {
    path: String,
    orig_path: Option<String>,
    status_field: String,
    change: ChangeFlags,
    cached: bool,
    merge_parents: usize,
}

impl RawStatusRecord {
    /// Destination path (the new name for renames and copies).
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Source path of a rename or copy.
    #[must_use]
    pub fn orig_path(&self) -> Option<&str> {
        self.orig_path.as_deref()
    }

    /// Status field as printed, e.g. `M`, `R086`, `MM`.
    #[must_use]
    pub fn status_field(&self) -> &str {
        &self.status_field
    }

    #[must_use]
    pub const fn change(&self) -> ChangeFlags {
        self.change
    }

    /// Whether the record came from the index-vs-HEAD comparison.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cached
    }

    /// Number of parents compared (2 or more for combined output).
    #[must_use]
    pub const fn merge_parents(&self) -> usize {
        self.merge_parents
    }

    /// Semantic flags for this record.
    ///
    /// Cached records always carry `IN_INDEX`.
    #[must_use]
    pub fn status(&self) -> FileStatus {
        let mut status = FileStatus::empty();
        if self.cached {
            status |= FileStatus::IN_INDEX;
        }
        if self
            .change
            .intersects(ChangeFlags::MODIFIED | ChangeFlags::TYPE_CHANGED)
        {
            status |= FileStatus::MODIFIED;
        }
        if self.change.contains(ChangeFlags::UNMERGED) {
            status |= FileStatus::CONFLICT;
        }
        if self.change.contains(ChangeFlags::DELETED) {
            status |= FileStatus::DELETED;
        }
        if self.change.contains(ChangeFlags::ADDED) {
            status |= FileStatus::NEW;
        }
        if self.change.contains(ChangeFlags::RENAMED) {
            status |= FileStatus::RENAMED;
        }
        if self.change.contains(ChangeFlags::COPIED) {
            status |= FileStatus::COPIED;
        }
        status
    }
}

/// Parses a whole report; `cached` tags every record with its source.
#[must_use]
pub fn parse(raw: &str, cached: bool) -> Vec<RawStatusRecord> {
    raw.lines()
        .filter_map(|line| parse_line(line, cached))
        .collect()
}

/// Parses one report line, or `None` for notices and malformed lines.
#[must_use]
pub fn parse_line(line: &str, cached: bool) -> Option<RawStatusRecord> {
    let line = line.trim_end_matches('\r');
    if !line.starts_with(':') {
        return None;
    }

    let parents = line.chars().take_while(|c| *c == ':').count();
    let Some((meta, paths)) = line[parents..].split_once('\t') else {
        trace!(line, "diff line without path");
        return None;
    };

    let fields: Vec<&str> = meta.split_whitespace().collect();
    // (parents + 1) modes, (parents + 1) ids, status
    if fields.len() < 2 * parents + 3 {
        trace!(line, "diff line with too few fields");
        return None;
    }
    let status_field = fields[fields.len() - 1];

    let change = status_field
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(ChangeFlags::from_letter)
        .fold(ChangeFlags::empty(), |acc, flag| acc | flag);
    if change.is_empty() {
        trace!(line, "diff line without status letter");
        return None;
    }

    let mut names = paths.split('\t').filter(|p| !p.is_empty()).map(unquote);
    let (orig_path, path) = match (names.next(), names.next()) {
        (Some(from), Some(to)) => (Some(from), to),
        (Some(only), None) => (None, only),
        (None, _) => {
            trace!(line, "diff line with empty path");
            return None;
        }
    };

    Some(RawStatusRecord {
        path,
        orig_path,
        status_field: status_field.to_string(),
        change,
        cached,
        merge_parents: parents,
    })
}

/// Undoes git's C-style path quoting (`core.quotePath`).
///
/// Unquoted input is returned as-is.
#[must_use]
pub fn unquote(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        let Some(esc) = iter.next() else {
            bytes.push(b'\\');
            break;
        };
        match esc {
            b'a' => bytes.push(0x07),
            b'b' => bytes.push(0x08),
            b'f' => bytes.push(0x0c),
            b'n' => bytes.push(b'\n'),
            b'r' => bytes.push(b'\r'),
            b't' => bytes.push(b'\t'),
            b'v' => bytes.push(0x0b),
            b'0'..=b'7' => {
                let mut value = u32::from(esc - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&d) if (b'0'..=b'7').contains(&d) => {
                            value = value * 8 + u32::from(d - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(u8::try_from(value).unwrap_or(u8::MAX));
            }
            other => bytes.push(other),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
