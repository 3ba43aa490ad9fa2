// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable set with copy-on-write sharing.
//!
//! ```text
//! Env { vars: Arc<BTreeMap<EnvKey, String>> }
//! clone shares the map; the first write copies it (Arc::make_mut)
//! ```

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::types::EnvKey;

/// A set of environment variables.
///
/// Cloning is cheap; the map is only copied when a clone is modified.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: Arc<BTreeMap<EnvKey, String>>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars.into_iter().map(|(k, v)| (EnvKey::new(k), v)).collect()),
        }
    }

    /// Sets (or overrides) a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.vars).insert(EnvKey::new(key), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Appends directories to `PATH`, after the existing entries.
    ///
    /// Leaves `PATH` untouched when `dirs` is empty.
    pub fn append_paths<P: AsRef<Path>>(&mut self, dirs: &[P]) -> &mut Self {
        if dirs.is_empty() {
            return self;
        }

        let mut entries: Vec<PathBuf> = self
            .get("PATH")
            .map(|current| std::env::split_paths(current).collect())
            .unwrap_or_default();
        entries.extend(dirs.iter().map(|d| d.as_ref().to_path_buf()));

        // split_paths/join_paths only fail on separator chars inside an entry
        match std::env::join_paths(&entries) {
            Ok(joined) => {
                self.set("PATH", joined.to_string_lossy().into_owned());
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring extra search paths");
            }
        }
        self
    }

    /// Raw `PATH` value, for executable lookup.
    #[must_use]
    pub fn search_path(&self) -> Option<OsString> {
        self.get("PATH").map(OsString::from)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}
