// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `run(command) -> ExecResult`, the seam git queries are written against.

use std::future::Future;

use crate::core::process::{ExecResult, GitProcess};

/// Runs one command string to completion.
pub trait GitRunner {
    fn run(&self, command: &str) -> impl Future<Output = ExecResult> + Send;
}

impl GitRunner for GitProcess {
    async fn run(&self, command: &str) -> ExecResult {
        Self::run(self, command).await
    }
}
