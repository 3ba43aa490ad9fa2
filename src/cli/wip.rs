// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the working-copy and runner commands.
//!
//! ```text
//! status [--json]       → snapshot, text or JSON
//! conflict PATH         → both modified | deleted by them | deleted by us
//! exec COMMAND          → payload; exit code from the outcome
//! tokenize COMMAND      → one argument per line
//! ```

use clap::Args;

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StatusArgs {
    /// Prints the snapshot as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `conflict` command.
#[derive(Debug, Clone, Args)]
pub struct ConflictArgs {
    /// Path of the conflicted file, relative to the working copy.
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// A single command string, e.g. `"git commit -m \"fix: a b c\""`.
#[derive(Debug, Clone, Args)]
pub struct CommandArgs {
    /// Command string, quoted as one shell argument.
    #[arg(value_name = "COMMAND")]
    pub command: String,
}
