//! Configuration and upload command handlers

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use gauge_client::ControlClient;

use super::read_config_file;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the saved configuration as JSON
    Get,
    /// Replace the saved configuration with the contents of a JSON file
    Set {
        /// Configuration file
        file: PathBuf,
    },
}

/// Handle config commands
pub async fn handle_config_command(command: ConfigCommands, client: &ControlClient) -> Result<()> {
    match command {
        ConfigCommands::Get => {
            let config = client.get_config().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommands::Set { file } => {
            let config = read_config_file(&file)?;
            client.save_config(&config).await?;
            println!("{}", "✓ Configuration saved!".green().bold());
            Ok(())
        }
    }
}

/// Upload a proxy source file
pub async fn upload(client: &ControlClient, file: &Path) -> Result<()> {
    let response = client.upload_file(file).await?;

    println!("{}", "✓ File uploaded!".green().bold());
    println!("  Stored as: {}", response.filename.cyan());
    println!(
        "{}",
        "  Set csv_file to this name to use it in proxy mode.".dimmed()
    );

    Ok(())
}
