//! Schedule command handlers

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use gauge_client::ControlClient;

use super::resolve_config;

/// Schedule subcommands
#[derive(Subcommand)]
pub enum ScheduleCommands {
    /// Print the installed schedule table
    Get,
    /// Replace the schedule with one recurring run
    Set {
        /// Cron expression; defaults to the configuration's cron_schedule
        #[arg(long)]
        cron: Option<String>,

        /// Run configuration file (JSON); defaults to the saved configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Handle schedule commands
pub async fn handle_schedule_command(
    command: ScheduleCommands,
    client: &ControlClient,
) -> Result<()> {
    match command {
        ScheduleCommands::Get => {
            let schedule = client.get_schedule().await?;
            if schedule.has_cron {
                print!("{}", schedule.cron);
                if !schedule.cron.ends_with('\n') {
                    println!();
                }
            } else {
                println!("{}", "No schedule installed.".yellow());
            }
            Ok(())
        }
        ScheduleCommands::Set { cron, config } => {
            let run_config = resolve_config(client, config.as_deref()).await?;
            let response = client.set_schedule(cron, run_config).await?;

            println!("{}", "✓ Schedule installed!".green().bold());
            if let Some(message) = response.message {
                println!("  {}", message.dimmed());
            }
            Ok(())
        }
    }
}
