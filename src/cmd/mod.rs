// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), exec (exec, tokenize),
//!   wip (status, untracked, conflict)
//! ```

pub mod config;
pub mod exec;
pub mod wip;

use std::path::Path;

use crate::config::Config;
use crate::config::settings::{RunnerSettings, SharedSettings};
use crate::core::process::GitProcess;

/// Builds the process runner for `working_dir` from the loaded configuration.
#[must_use]
pub fn git_process(config: &Config, working_dir: &Path) -> GitProcess {
    let settings = SharedSettings::new(RunnerSettings::from(&config.git));
    GitProcess::new(working_dir, settings)
}
