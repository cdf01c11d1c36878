//! Gauge CLI
//!
//! Command-line interface for the gauge control plane.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "gauge")]
#[command(about = "Drive the speed-test worker through its control plane", long_about = None)]
struct Cli {
    /// Control plane URL
    #[arg(long, env = "GAUGE_SERVER_URL", default_value = "http://localhost:5000")]
    server_url: String,

    /// Database for `memory` notes
    #[arg(long, env = "GAUGE_MEMORY_DB", default_value = "memory.db")]
    memory_db: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        memory_db: cli.memory_db,
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::{ConfigCommands, MemoryCommands, ScheduleCommands};

    #[test]
    fn test_parse_schedule_set() {
        let cli = Cli::try_parse_from([
            "gauge",
            "--server-url",
            "http://gauge:5000",
            "schedule",
            "set",
            "--cron",
            "0 3 * * *",
        ])
        .unwrap();

        assert_eq!(cli.server_url, "http://gauge:5000");
        match cli.command {
            Commands::Schedule {
                command: ScheduleCommands::Set { cron, config },
            } => {
                assert_eq!(cron.as_deref(), Some("0 3 * * *"));
                assert!(config.is_none());
            }
            _ => panic!("expected schedule set"),
        }
    }

    #[test]
    fn test_parse_memory_words() {
        let cli = Cli::try_parse_from(["gauge", "memory", "add", "HKG", "is", "fastest"]).unwrap();

        assert_eq!(cli.memory_db, "memory.db");
        match cli.command {
            Commands::Memory {
                command: MemoryCommands::Add { text },
            } => assert_eq!(text.join(" "), "HKG is fastest"),
            _ => panic!("expected memory add"),
        }
    }

    #[test]
    fn test_parse_config_set_requires_file() {
        assert!(Cli::try_parse_from(["gauge", "config", "set"]).is_err());

        let cli = Cli::try_parse_from(["gauge", "config", "set", "run.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { .. }
            }
        ));
    }
}
