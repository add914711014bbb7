//! mnemo CLI: attach free-text memories to subjects and recall them.
//!
//! Each invocation opens the store, runs one command, and closes the store.

mod cli;
mod cmd;
mod config;
mod error;
mod render;

use crate::cli::{Cli, Commands};
use crate::error::CliResult;
use clap::Parser;
use colored::Colorize;
use mnemo_memory::MemoryService;
use mnemo_types::config::MnemoConfig;
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Filter used until the config file has been read.
const BOOT_LOG_LEVEL: &str = "warn";

/// Handle for swapping in the configured log level once it is known.
struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogControl {
    fn apply(&self, level: &str) {
        // RUST_LOG always wins over the config file
        if self.from_env {
            return;
        }
        match EnvFilter::try_new(level) {
            Ok(filter) => {
                if let Err(e) = self.handle.reload(filter) {
                    tracing::warn!(error = %e, "Could not apply configured log level");
                }
            }
            Err(e) => tracing::warn!(error = %e, level, "Invalid log_level in config"),
        }
    }
}

/// Trace to stderr so stdout only carries command output.
fn init_tracing() -> LogControl {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(BOOT_LOG_LEVEL)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    LogControl { handle, from_env }
}

/// Apply command-line overrides on top of the file config.
fn resolve_config(cli: &Cli) -> MnemoConfig {
    let mut config = config::load_config(cli.config.as_deref());
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(table) = &cli.table {
        config.table_name = table.clone();
    }
    config
}

fn run(cli: Cli, config: &MnemoConfig) -> CliResult<String> {
    let service = MemoryService::open(config)?;
    let output = match cli.command {
        Commands::Remember { subject, text } => cmd::cmd_remember(&service, &subject, &text),
        Commands::Lookup {
            subject,
            index,
            all,
            json,
        } => cmd::cmd_lookup(&service, &subject, index.as_deref(), all, json),
        Commands::Remembered { json } => cmd::cmd_remembered(&service, json),
        Commands::Forget { subject, selector } => {
            cmd::cmd_forget(&service, &subject, selector.as_deref())
        }
    };
    service.close()?;
    output
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logs = init_tracing();
    let config = resolve_config(&cli);
    logs.apply(&config.log_level);

    match run(cli, &config) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(&cfg_path, "db_path = \"/from/file.db\"\ntable_name = \"file_table\"\n")
            .unwrap();
        let db_path = dir.path().join("flag.db");

        let cli = Cli::try_parse_from([
            "mnemo",
            "remembered",
            "--config",
            cfg_path.to_str().unwrap(),
            "--db",
            db_path.to_str().unwrap(),
        ])
        .unwrap();
        let config = resolve_config(&cli);
        assert_eq!(config.db_path, db_path);
        assert_eq!(config.table_name, "file_table");
    }

    #[test]
    fn test_run_against_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let config = MnemoConfig {
            db_path: dir.path().join("memory.db"),
            ..Default::default()
        };

        let cli = Cli::try_parse_from(["mnemo", "remember", "thing1", "first", "thing"]).unwrap();
        assert_eq!(run(cli, &config).unwrap(), "Remembered thing1.");

        let cli = Cli::try_parse_from(["mnemo", "remembered"]).unwrap();
        assert_eq!(run(cli, &config).unwrap(), "thing1:1");

        let cli = Cli::try_parse_from(["mnemo", "lookup", "thing1", "5"]).unwrap();
        assert_eq!(run(cli, &config).unwrap_err().exit_code(), 2);
    }
}
