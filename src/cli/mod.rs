// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitwip using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitwip [global options] <command>
//! version
//! options
//! inis
//! status [--json]
//! untracked
//! conflict <PATH>
//! exec <COMMAND>
//! tokenize <COMMAND>
//! ```

pub mod global;
pub mod wip;


use crate::cli::global::GlobalOptions;
use crate::cli::wip::{CommandArgs, ConflictArgs, StatusArgs};
use clap::{Parser, Subcommand};

/// Working-copy status engine for the git CLI.
#[derive(Debug, Parser)]
#[command(
    name = "gitwip",
    author,
    version,
    about = "Working-copy status engine for the git CLI",
    long_about = "gitwip Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Runs git as a subprocess and merges its unstaged, staged and\n\
                  untracked reports into one status per path. See\n\
                  `gitwip <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  gitwip reads `gitwip.toml` from the current directory if present,\n\
                  then every file given with --ini, in order. GITWIP_SECTION__KEY\n\
                  environment variables (e.g. GITWIP_GIT__BINARY) override files,\n\
                  and --set section.key=value overrides everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,

    /// Shows the status of every changed, staged, conflicted or untracked path.
    Status(StatusArgs),

    /// Lists untracked paths.
    Untracked,

    /// Shows how a conflicted path diverged.
    Conflict(ConflictArgs),

    /// Runs one command string through the process runner.
    Exec(CommandArgs),

    /// Shows how a command string is split into arguments.
    Tokenize(CommandArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
