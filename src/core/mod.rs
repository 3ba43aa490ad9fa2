// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for running the external tool.
//!
//! ```text
//!                 core
//!                  |
//!      +-----------+-----------+
//!      |           |           |
//!      v           v           v
//!   tokenize      env       process
//!      |           |           |
//!  ArgumentVector Env      GitProcess
//!  ParityTokenizer tool_env RunningProcess
//!                          ExecResult
//! ```

pub mod env;
pub mod process;
pub mod tokenize;
