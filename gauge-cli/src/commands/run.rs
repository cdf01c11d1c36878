//! Run, status and log command handlers

use std::path::Path;

use anyhow::Result;
use colored::*;
use gauge_client::ControlClient;
use gauge_core::domain::run::RunState;

use super::resolve_config;

/// Start a worker run
pub async fn run_now(client: &ControlClient, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(client, config_path).await?;

    println!(
        "{}",
        format!("Starting {} run...", config.effective_mode()).dimmed()
    );
    let response = client.run_now(&config).await?;

    println!("{}", "✓ Run started!".green().bold());
    if let Some(message) = response.message {
        println!("  {}", message.dimmed());
    }

    Ok(())
}

/// Show whether a worker is running
pub async fn show_status(client: &ControlClient) -> Result<()> {
    let status = client.status().await?;

    let state = match status.status {
        RunState::Running => status.status.as_str().green().bold(),
        RunState::Idle => status.status.as_str().dimmed(),
    };
    println!("Worker: {}", state);

    Ok(())
}

/// Print or clear the worker log
pub async fn logs(client: &ControlClient, clear: bool) -> Result<()> {
    if clear {
        client.clear_logs().await?;
        println!("{}", "✓ Log cleared".green().bold());
        return Ok(());
    }

    let logs = client.logs().await?;
    if logs.is_empty() {
        println!("{}", "Log is empty.".yellow());
    } else {
        print!("{}", logs);
        if !logs.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
