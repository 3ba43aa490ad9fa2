// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment construction for the spawned git process.
//!
//! ```text
//! current_env()                       inherited variables
//!      |
//!      v
//! tool_env(base, &RunnerSettings)
//!      GIT_TRACE=0            no debug traces mixed into output
//!      GIT_FLUSH=0            skip per-record fflush in `git log`
//!      GIT_TERMINAL_PROMPT=0  never block on a terminal prompt
//!      SSH_ASKPASS            configured > inherited > platform default
//!      PATH                   inherited + extra_paths
//! ```

pub mod container;
pub mod types;


use crate::config::settings::RunnerSettings;
use container::Env;

/// Askpass helper used when neither config nor environment names one.
pub const DEFAULT_ASKPASS: &str = if cfg!(windows) {
    "win-ssh-askpass"
} else {
    "ssh-askpass"
};

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> Env {
    Env::from_map(std::env::vars().collect())
}

/// Builds the environment for one tool invocation on top of `base`.
#[must_use]
pub fn tool_env(base: &Env, settings: &RunnerSettings) -> Env {
    let mut env = base.clone();

    env.set("GIT_TRACE", "0")
        .set("GIT_FLUSH", "0")
        .set("GIT_TERMINAL_PROMPT", "0");

    match settings.askpass() {
        Some(askpass) => {
            env.set("SSH_ASKPASS", askpass);
        }
        None => {
            if env.get("SSH_ASKPASS").is_none_or(str::is_empty) {
                env.set("SSH_ASKPASS", DEFAULT_ASKPASS);
            }
        }
    }

    env.append_paths(settings.extra_paths());
    env
}
