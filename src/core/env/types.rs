// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key type for environment maps.
//!
//! ```text
//! EnvKey: on Windows compares ASCII case-insensitively (PATH == Path),
//!         elsewhere byte-exact; keeps the spelling it was inserted with
//! ```

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// An environment variable key with the platform's case rules.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(String);

impl EnvKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }
}

const fn fold(b: u8) -> u8 {
    if cfg!(windows) {
        b.to_ascii_lowercase()
    } else {
        b
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Hash for EnvKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            fold(b).hash(state);
        }
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.0.bytes().map(fold);
        let rhs = other.0.bytes().map(fold);
        lhs.cmp(rhs)
    }
}
