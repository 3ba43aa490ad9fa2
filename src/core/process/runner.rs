// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! execute() / execute_with_cancellation(token)
//!              |
//!              v
//!          prepare()
//!     tokenize, env, which_in
//!              |
//!              v
//!          spawn()  --Err--> ProcessError (nothing running)
//!              |
//!              v
//!   supervisor task: wait for exit
//!     or token canceled --> wait for exit
//!                           (kill after grace, if configured)
//!              |
//!              v
//!   join readers --> Completion --> ExecResult::classify
//! ```

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::builder::{Completion, ExecResult, GitProcess, PreparedCommand};
use super::io::{OutputBuffer, spawn_stderr_reader, spawn_stdout_reader};
use crate::error::ProcessError;

const SUBSCRIBER_CAPACITY: usize = 64;

/// Handle to a started invocation.
///
/// The result is produced once, by [`wait`](Self::wait) or
/// [`cancel`](Self::cancel). Dropping the handle detaches the process.
#[derive(Debug)]
pub struct RunningProcess {
    command: String,
    pid: Option<u32>,
    token: CancellationToken,
    chunks: broadcast::Sender<String>,
    supervisor: JoinHandle<ExecResult>,
}

impl RunningProcess {
    /// OS process id, if still known.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    #[must_use]
    pub fn command_line(&self) -> &str {
        &self.command
    }

    /// Token that cancels this invocation when tripped.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Receives stdout chunks captured from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.chunks.subscribe()
    }

    /// Waits for the process to exit and returns the classified result.
    pub async fn wait(self) -> ExecResult {
        match self.supervisor.await {
            Ok(result) => result,
            Err(e) => {
                warn!(cmd = %self.command, error = %e, "supervisor task failed");
                ExecResult::failed(format!("{}: {e}", self.command))
            }
        }
    }

    /// Stops capturing stdout and waits for the process to exit.
    ///
    /// The child is not killed unless a kill grace period is configured.
    pub async fn cancel(self) -> ExecResult {
        debug!(cmd = %self.command, "cancel requested");
        self.token.cancel();
        self.wait().await
    }
}

impl GitProcess {
    /// Starts `command` in the working directory.
    ///
    /// Returns once the OS has created the process.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] if the command cannot be tokenized, the
    /// program cannot be found, or spawning fails. Nothing is running then.
    pub fn execute(&self, command: &str) -> Result<RunningProcess, ProcessError> {
        self.execute_with_cancellation(command, CancellationToken::new())
    }

    /// Starts `command`; canceling `token` has the effect of [`RunningProcess::cancel`].
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn execute_with_cancellation(
        &self,
        command: &str,
        token: CancellationToken,
    ) -> Result<RunningProcess, ProcessError> {
        let prepared = match self.prepare(command) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!(cmd = %command, error = %e, "cannot start");
                return Err(e);
            }
        };
        let cmd_line = prepared.command_line();

        debug!(cwd = %self.working_dir().display(), "cd");
        debug!(cmd = %cmd_line, "exec");

        let mut child = self.build_command(&prepared).spawn().map_err(|source| {
            warn!(cmd = %cmd_line, error = %source, "spawn failed");
            ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            }
        })?;

        let pid = child.id();
        trace!(cmd = %cmd_line, pid = ?pid, "spawned");

        let (chunks, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        let stdout = child
            .stdout
            .take()
            .map(|out| spawn_stdout_reader(out, token.clone(), chunks.clone(), pid));
        let stderr = child
            .stderr
            .take()
            .map(|err| spawn_stderr_reader(err, pid));

        let supervisor = tokio::spawn(supervise(
            child,
            Readers { stdout, stderr },
            token.clone(),
            prepared.kill_after(),
            cmd_line.clone(),
        ));

        Ok(RunningProcess {
            command: cmd_line,
            pid,
            token,
            chunks,
            supervisor,
        })
    }

    /// Runs `command` to completion.
    ///
    /// Start failures become a [`Failed`](super::Outcome::Failed) result
    /// carrying the error text.
    pub async fn run(&self, command: &str) -> ExecResult {
        match self.execute(command) {
            Ok(process) => process.wait().await,
            Err(e) => ExecResult::failed(e.to_string()),
        }
    }

    fn build_command(&self, prepared: &PreparedCommand) -> Command {
        let mut command = Command::new(prepared.program());
        command.args(prepared.args());
        command.current_dir(self.working_dir());

        command.env_clear();
        for (key, value) in prepared.env().iter() {
            command.env(key, value);
        }

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        command
    }
}

struct Readers {
    stdout: Option<JoinHandle<OutputBuffer>>,
    stderr: Option<JoinHandle<String>>,
}

async fn supervise(
    mut child: Child,
    readers: Readers,
    token: CancellationToken,
    kill_after: Option<Duration>,
    cmd_line: String,
) -> ExecResult {
    let status = tokio::select! {
        status = child.wait() => status,
        () = token.cancelled() => {
            debug!(cmd = %cmd_line, "waiting for canceled process to exit");
            wait_after_cancel(&mut child, kill_after, &cmd_line).await
        }
    };

    let stdout = match readers.stdout {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(cmd = %cmd_line, error = %e, "stdout reader failed");
            OutputBuffer::new()
        }),
        None => OutputBuffer::new(),
    };
    let mut stderr = match readers.stderr {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(cmd = %cmd_line, error = %e, "stderr reader failed");
            String::new()
        }),
        None => String::new(),
    };

    let exit_code = match status {
        Ok(status) => status.code(),
        Err(source) => {
            let err = ProcessError::Io {
                command: cmd_line.clone(),
                source,
            };
            warn!(error = %err, "wait failed");
            stderr.push_str(&err.to_string());
            None
        }
    };

    let chunks = stdout.chunk_count();
    let result = ExecResult::classify(Completion {
        exit_code,
        stdout: stdout.into_string(),
        stderr,
        canceled: token.is_cancelled(),
    });

    debug!(
        cmd = %cmd_line,
        outcome = %result.outcome(),
        exit_code = ?result.exit_code(),
        chunks,
        "finished"
    );
    result
}

async fn wait_after_cancel(
    child: &mut Child,
    kill_after: Option<Duration>,
    cmd_line: &str,
) -> std::io::Result<ExitStatus> {
    let Some(grace) = kill_after else {
        return child.wait().await;
    };

    if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
        return status;
    }

    warn!(cmd = %cmd_line, grace = ?grace, "process still running after cancel, killing");
    if let Err(e) = child.kill().await {
        warn!(cmd = %cmd_line, error = %e, "kill failed");
    }
    child.wait().await
}
