// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for gitwip.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitwip.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. GITWIP_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITWIP_GIT__BINARY=/opt/git/bin/git       → git.binary
//! GITWIP_GIT__KILL_AFTER_MS=5000           → git.kill_after_ms
//! ```
//!
//! # Runtime Settings
//!
//! ```text
//! Config.git --> RunnerSettings (immutable)
//!                     |
//!               SharedSettings   RwLock<Arc<RunnerSettings>>
//!               replace() swaps the whole Arc, snapshot() clones it
//! ```

pub mod loader;
pub mod settings;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GitConfig, GlobalConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// External git tool options.
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitwip::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitwip.toml")
    ///     .with_env_prefix("GITWIP")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a section holds an invalid value.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".to_string(),
            self.global
                .log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );
        options.insert(
            "git.binary".to_string(),
            self.git
                .binary
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        );
        options.insert(
            "git.extra_paths".to_string(),
            self.git
                .extra_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        );
        options.insert(
            "git.askpass".to_string(),
            self.git.askpass.clone().unwrap_or_default(),
        );
        options.insert(
            "git.kill_after_ms".to_string(),
            self.git
                .kill_after_ms
                .map(|ms| ms.to_string())
                .unwrap_or_default(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
