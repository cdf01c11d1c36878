//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod config;
mod memory;
mod results;
mod run;
mod schedule;

pub use config::ConfigCommands;
pub use memory::MemoryCommands;
pub use schedule::ScheduleCommands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use gauge_client::ControlClient;
use gauge_core::domain::config::RunConfiguration;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show whether a worker is running
    Status,
    /// Start a worker run now
    Run {
        /// Run configuration file (JSON); defaults to the saved configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show the worker log
    Logs {
        /// Truncate the log instead of printing it
        #[arg(long)]
        clear: bool,
    },
    /// Show the latest results
    Results,
    /// Saved run configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Recurring runs
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },
    /// Upload a proxy source file (.csv or .txt)
    Upload {
        /// File to upload
        file: PathBuf,
    },
    /// Local notes
    Memory {
        #[command(subcommand)]
        command: MemoryCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = ControlClient::new(&config.server_url);

    match command {
        Commands::Status => run::show_status(&client).await,
        Commands::Run { config } => run::run_now(&client, config.as_deref()).await,
        Commands::Logs { clear } => run::logs(&client, clear).await,
        Commands::Results => results::show_results(&client).await,
        Commands::Config { command } => config::handle_config_command(command, &client).await,
        Commands::Schedule { command } => {
            schedule::handle_schedule_command(command, &client).await
        }
        Commands::Upload { file } => config::upload(&client, &file).await,
        Commands::Memory { command } => memory::handle_memory_command(command, config).await,
    }
}

/// Read a run configuration from a JSON file
///
/// Keys missing from the file take their defaults.
fn read_config_file(path: &Path) -> Result<RunConfiguration> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    if !value.is_object() {
        anyhow::bail!("Config file must hold a JSON object: {}", path.display());
    }

    Ok(serde_json::from_value(value)?)
}

/// The configuration from `path`, or the one saved on the server
async fn resolve_config(client: &ControlClient, path: Option<&Path>) -> Result<RunConfiguration> {
    match path {
        Some(path) => read_config_file(path),
        None => Ok(client
            .get_config()
            .await
            .context("Failed to fetch saved configuration")?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::domain::config::Mode;

    #[test]
    fn test_read_config_file_merges_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"mode": "normal", "region": "NRT"}"#).unwrap();

        let config = read_config_file(&path).unwrap();
        assert_eq!(config.mode, Mode::Normal);
        assert_eq!(config.region, "NRT");
        assert_eq!(config.count, RunConfiguration::default().count);
    }

    #[test]
    fn test_read_config_file_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(read_config_file(&path).is_err());
        assert!(read_config_file(&dir.path().join("missing.json")).is_err());
    }
}
