// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process-wide runner settings with snapshot swap.
//!
//! Readers take an `Arc` snapshot once per invocation; the single writer
//! replaces the whole value. A reader never observes a half-updated list.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::types::GitConfig;

/// Immutable settings read by one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerSettings {
    binary: Option<PathBuf>,
    extra_paths: Vec<PathBuf>,
    askpass: Option<String>,
    kill_after: Option<Duration>,
}

impl RunnerSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the program token of every command with `binary`.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    #[must_use]
    pub fn with_extra_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.extra_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_askpass(mut self, askpass: impl Into<String>) -> Self {
        self.askpass = Some(askpass.into());
        self
    }

    #[must_use]
    pub const fn with_kill_after(mut self, grace: Duration) -> Self {
        self.kill_after = Some(grace);
        self
    }

    #[must_use]
    pub fn binary(&self) -> Option<&PathBuf> {
        self.binary.as_ref()
    }

    #[must_use]
    pub fn extra_paths(&self) -> &[PathBuf] {
        &self.extra_paths
    }

    #[must_use]
    pub fn askpass(&self) -> Option<&str> {
        self.askpass.as_deref()
    }

    #[must_use]
    pub const fn kill_after(&self) -> Option<Duration> {
        self.kill_after
    }
}

impl From<&GitConfig> for RunnerSettings {
    fn from(git: &GitConfig) -> Self {
        Self {
            binary: git.binary.clone(),
            extra_paths: git.extra_paths.clone(),
            askpass: git.askpass.clone(),
            kill_after: git.kill_after(),
        }
    }
}

/// Shared handle to the current [`RunnerSettings`].
///
/// Cloning the handle shares the same slot.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    slot: Arc<RwLock<Arc<RunnerSettings>>>,
}

impl SharedSettings {
    #[must_use]
    pub fn new(settings: RunnerSettings) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Arc::new(settings))),
        }
    }

    /// Current settings; unaffected by later [`replace`](Self::replace) calls.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RunnerSettings> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps in new settings for all subsequent invocations.
    pub fn replace(&self, settings: RunnerSettings) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(settings);
    }

    /// Replaces only the extra search-path directories.
    pub fn set_extra_paths<I, P>(&self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let next = (**slot).clone().with_extra_paths(paths);
        *slot = Arc::new(next);
    }
}
