// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runner commands: exec and tokenize.
//!
//! ```text
//! exec "git fetch origin"
//!   execute --> RunningProcess
//!   Ctrl-C  --> cancel (stop capturing, wait for exit)
//!   wait    --> print payload; Err unless Succeeded
//! ```

use std::path::Path;

use anyhow::bail;
use tracing::warn;

use crate::cli::wip::CommandArgs;
use crate::config::Config;
use crate::core::tokenize::tokenize;
use crate::error::Result;

use super::git_process;

/// Runs one command string and prints its payload.
///
/// # Errors
///
/// Returns an error if the command cannot be started or does not succeed.
pub async fn run_exec_command(args: &CommandArgs, config: &Config, dir: &Path) -> Result<()> {
    let running = git_process(config, dir).execute(&args.command)?;

    let token = running.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, waiting for the process to exit");
            token.cancel();
        }
    });

    let result = running.wait().await;
    interrupt.abort();

    print!("{}", result.output());
    if !result.success() {
        bail!(
            "command {} (exit code {})",
            result.outcome(),
            result
                .exit_code()
                .map_or_else(|| "none".to_string(), |code| code.to_string())
        );
    }
    Ok(())
}

/// Prints the argument vector of a command string, one argument per line.
///
/// # Errors
///
/// Returns an error if the command cannot be tokenized.
pub fn run_tokenize_command(args: &CommandArgs) -> Result<()> {
    let argv = tokenize(&args.command)?;
    for arg in argv.as_slice() {
        println!("{arg}");
    }
    Ok(())
}
