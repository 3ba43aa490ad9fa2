// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async execution of one git invocation.
//!
//! ```text
//! GitProcess::new(dir, SharedSettings)
//!   .execute("git diff-index HEAD")
//!       tokenize -> binary override -> tool_env -> which_in
//!       --> tokio::process::Command (stdin null, stdout/stderr piped)
//!       --> RunningProcess
//!             stdout reader: chunks -> OutputBuffer (+ subscribers)
//!             stderr reader: read to end
//!             .wait() / .cancel()
//!       --> ExecResult { outcome, output, exit_code }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;

pub use builder::{Completion, ExecResult, GitProcess, Outcome, PreparedCommand};
pub use io::OutputBuffer;
pub use runner::RunningProcess;
