// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Status | Untracked | Conflict | Exec | Tokenize
//! ```

use std::process::ExitCode;

use gitwip::cli::global::GlobalOptions;
use gitwip::cli::{self, Command};
use gitwip::cmd::config::{run_inis_command, run_options_command};
use gitwip::cmd::exec::{run_exec_command, run_tokenize_command};
use gitwip::cmd::wip::{run_conflict_command, run_status_command, run_untracked_command};
use gitwip::config::Config;
use gitwip::config::loader::ConfigLoader;
use gitwip::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Version and tokenize need neither config nor logging.
    match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return ExitCode::SUCCESS;
        }
        Some(Command::Tokenize(args)) => return exit_code(run_tokenize_command(args)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return ExitCode::FAILURE;
        }
        _ => {}
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from_global(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    exit_code(dispatch_command(&cli, &config).await)
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> gitwip::error::Result<()> {
    let dir = cli.global.working_dir()?;

    match &cli.command {
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            run_inis_command(&build_config_loader(&cli.global).format_loaded_files());
            Ok(())
        }
        Some(Command::Status(args)) => run_status_command(args, config, &dir).await,
        Some(Command::Untracked) => run_untracked_command(config, &dir).await,
        Some(Command::Conflict(args)) => run_conflict_command(args, config, &dir).await,
        Some(Command::Exec(args)) => run_exec_command(args, config, &dir).await,
        Some(Command::Version | Command::Tokenize(_)) | None => Ok(()),
    }
}

fn exit_code(result: gitwip::error::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("gitwip.toml");
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix("GITWIP")
}

fn load_config(global: &GlobalOptions) -> gitwip::error::Result<Config> {
    build_config_loader(global)
        .apply_overrides(&global.to_config_overrides())?
        .build()
}
