// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Invocation setup and result classification.
//!
//! ```text
//! GitProcess { working_dir, settings, base_env, tokenizer }
//!  • new/with_env/with_tokenizer
//!  • prepare(command) --> PreparedCommand { program, args, env, kill_after }
//!
//! Completion { exit_code, stdout, stderr, canceled }
//!       |
//!       v  ExecResult::classify
//! ExecResult { outcome: Succeeded | Failed | Canceled, output, exit_code }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config::settings::SharedSettings;
use crate::core::env::container::Env;
use crate::core::env::{current_env, tool_env};
use crate::core::tokenize::{ArgumentVector, CommandTokenizer, ParityTokenizer};
use crate::error::ProcessError;

/// Substrings in stderr that mark an invocation as failed (ASCII, lowercase).
const FAILURE_MARKERS: [&str; 3] = ["error", "fatal: ", "could not read username"];

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Succeeded,
    Failed,
    Canceled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        })
    }
}

/// Raw facts about a finished process, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// `None` when the process did not exit normally (e.g. killed by a signal).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub canceled: bool,
}

/// Classified result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    outcome: Outcome,
    output: String,
    exit_code: Option<i32>,
}

impl ExecResult {
    /// Classifies a finished process.
    ///
    /// Failure when the exit was abnormal, the run was canceled, or stderr
    /// contains one of the failure markers (case-insensitive). A failed or
    /// canceled result carries stderr only, falling back to stdout when
    /// stderr is empty. A successful one carries stdout followed by stderr.
    #[must_use]
    pub fn classify(completion: Completion) -> Self {
        let Completion {
            exit_code,
            stdout,
            stderr,
            canceled,
        } = completion;

        let outcome = if canceled {
            Outcome::Canceled
        } else if exit_code.is_none() || has_failure_marker(&stderr) {
            Outcome::Failed
        } else {
            Outcome::Succeeded
        };

        let output = match outcome {
            Outcome::Succeeded => stdout + &stderr,
            Outcome::Failed | Outcome::Canceled if stderr.is_empty() => stdout,
            Outcome::Failed | Outcome::Canceled => stderr,
        };

        Self {
            outcome,
            output,
            exit_code,
        }
    }

    /// A successful result, as produced by a process that printed `output`.
    #[must_use]
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Succeeded,
            output: output.into(),
            exit_code: Some(0),
        }
    }

    /// A failed result carrying a diagnostic, with no exit code.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failed,
            output: message.into(),
            exit_code: None,
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True only for [`Outcome::Succeeded`].
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded)
    }

    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self.outcome, Outcome::Canceled)
    }

    /// Payload text: stdout + stderr on success, the diagnostic otherwise.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Exit code, if the process exited normally.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

fn has_failure_marker(stderr: &str) -> bool {
    if stderr.is_empty() {
        return false;
    }
    let lowered = stderr.to_ascii_lowercase();
    FAILURE_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Everything needed to spawn one invocation.
#[derive(Debug, Clone)]
pub struct PreparedCommand {
    program: PathBuf,
    argv: ArgumentVector,
    env: Env,
    kill_after: Option<Duration>,
}

impl PreparedCommand {
    /// Resolved executable path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument vector; the first element is the program token as given.
    #[must_use]
    pub const fn argv(&self) -> &ArgumentVector {
        &self.argv
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        self.argv.args()
    }

    #[must_use]
    pub const fn env(&self) -> &Env {
        &self.env
    }

    #[must_use]
    pub const fn kill_after(&self) -> Option<Duration> {
        self.kill_after
    }

    /// Command line for logging.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.argv.to_string()
    }
}

/// Runs command strings against one working directory.
///
/// Cloning is cheap; clones share the settings slot.
#[derive(Clone)]
pub struct GitProcess {
    working_dir: PathBuf,
    settings: SharedSettings,
    base_env: Env,
    tokenizer: Arc<dyn CommandTokenizer + Send + Sync>,
}

impl fmt::Debug for GitProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitProcess")
            .field("working_dir", &self.working_dir)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GitProcess {
    /// Creates a runner that inherits the current process environment.
    pub fn new(working_dir: impl Into<PathBuf>, settings: SharedSettings) -> Self {
        Self {
            working_dir: working_dir.into(),
            settings,
            base_env: current_env(),
            tokenizer: Arc::new(ParityTokenizer),
        }
    }

    /// Replaces the inherited environment.
    #[must_use]
    pub fn with_env(mut self, env: Env) -> Self {
        self.base_env = env;
        self
    }

    /// Replaces the command tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: impl CommandTokenizer + Send + Sync + 'static) -> Self {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub const fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// Tokenizes `command` and resolves everything needed to spawn it.
    ///
    /// The configured binary override replaces the program token. The
    /// program is looked up on the extended search path.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::Tokenize`] if the command cannot be split.
    /// - [`ProcessError::ExecutableNotFound`] if the program is not on the search path.
    pub fn prepare(&self, command: &str) -> Result<PreparedCommand, ProcessError> {
        let settings = self.settings.snapshot();
        let mut tokens = self.tokenizer.tokenize(command)?.into_vec();

        if let Some(binary) = settings.binary()
            && let Some(program) = tokens.first_mut()
        {
            *program = binary.to_string_lossy().into_owned();
        }

        let argv = ArgumentVector::from(tokens);
        let env = tool_env(&self.base_env, &settings);

        let name = argv.program().unwrap_or_default();
        let program = which::which_in(name, env.search_path(), &self.working_dir).map_err(|_| {
            ProcessError::ExecutableNotFound {
                name: name.to_string(),
            }
        })?;

        Ok(PreparedCommand {
            program,
            argv,
            env,
            kill_after: settings.kill_after(),
        })
    }
}
