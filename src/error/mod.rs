// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        WipError (~16 bytes)
//!             |
//!       +-----+-----+
//!       |           |
//!       v           v
//!    Process       Git
//!      Box         Box
//!
//! Sub-errors (unboxed internally):
//!   Process  Tokenize, ExecutableNotFound, SpawnFailed, Io
//!   Tokenize NoSeparator, Empty
//!   Git      CommandFailed, HeadUnresolved
//!
//! ConfigError stands alone; config and CLI code reports through anyhow.
//! ```
//!
//! A tool that ran but reported failure is not an error here: it is an
//! [`ExecResult`](crate::core::process::ExecResult) with a failed outcome.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`WipError`].
pub type WipResult<T> = std::result::Result<T, WipError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum WipError {
    /// The external tool could not be started.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// A git query could not produce a usable answer.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for WipError {
                fn from(err: $error) -> Self {
                    WipError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProcessError => Process,
    GitError => Git,
}

impl From<TokenizeError> for WipError {
    fn from(err: TokenizeError) -> Self {
        Self::Process(Box::new(ProcessError::Tokenize(err)))
    }
}

// --- Tokenizer Errors ---

/// A command string that cannot be split into an argument vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// Every placeholder separator candidate already occurs in the command.
    #[error("no free separator character for command: {command}")]
    NoSeparator { command: String },

    /// The command produced no arguments at all.
    #[error("command is empty")]
    Empty,
}

// --- Process Errors ---

/// Failures that prevent a process from starting.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command string could not be tokenized; nothing was spawned.
    #[error("cannot start: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Executable not found on the (extended) search path.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// The OS refused to create the process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed.
    #[error("io error while running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Git Errors ---

/// Git query errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command ran but reported failure.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// HEAD could not be resolved and the repository is not simply empty.
    #[error("cannot resolve HEAD: {message}")]
    HeadUnresolved { message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
