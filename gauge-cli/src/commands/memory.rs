//! Memory command handlers
//!
//! Notes live in a local SQLite file and never touch the control plane.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use gauge_memory::{MemoryStore, render};

use crate::config::Config;

const PREVIEW_CHARS: usize = 100;

/// Memory subcommands
#[derive(Subcommand)]
pub enum MemoryCommands {
    /// Remember a note
    Add {
        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Find notes containing the given text (case-sensitive)
    Search {
        /// Text to look for
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Handle memory commands
pub async fn handle_memory_command(command: MemoryCommands, config: &Config) -> Result<()> {
    let store = MemoryStore::open(&config.memory_db)
        .await
        .with_context(|| format!("Failed to open memory store: {}", config.memory_db))?;

    match command {
        MemoryCommands::Add { text } => {
            let content = text.join(" ");
            store.add(&content).await?;
            println!("{} {}", "✓ Remembered:".green().bold(), preview(&content));
        }
        MemoryCommands::Search { text } => {
            let query = text.join(" ");
            println!("{}", format!("Searching for: {}", query).dimmed());
            let records = store.search(&query).await?;
            println!("{}", render(&records));
        }
    }

    Ok(())
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_string(),
    }
}
