// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitwip.
//!
//! ```text
//! Config: GlobalConfig (logging), GitConfig (binary, extra_paths, askpass, kill_after_ms)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// How the external git tool is launched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Alternate binary launched instead of the command's own program name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,
    /// Directories appended to `PATH` for every invocation.
    pub extra_paths: Vec<PathBuf>,
    /// `SSH_ASKPASS` helper; falls back to the inherited value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub askpass: Option<String>,
    /// Kill a canceled process that has not exited after this many
    /// milliseconds. Unset means wait for the process however long it takes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kill_after_ms: Option<u64>,
}

impl GitConfig {
    /// Validates field values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for an empty binary path or an
    /// empty entry in `extra_paths`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .binary
            .as_ref()
            .is_some_and(|b| b.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "binary".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(pos) = self
            .extra_paths
            .iter()
            .position(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                section: "git".to_string(),
                key: "extra_paths".to_string(),
                message: format!("entry {pos} is empty"),
            });
        }
        Ok(())
    }

    /// Grace period before a canceled process is killed, if escalation is on.
    #[must_use]
    pub fn kill_after(&self) -> Option<Duration> {
        self.kill_after_ms.map(Duration::from_millis)
    }
}
