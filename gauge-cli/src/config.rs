//! Configuration module
//!
//! Handles CLI configuration: where the control plane lives and where local
//! notes are kept.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the gauge control plane
    pub server_url: String,
    /// SQLite database for the memory subcommands
    pub memory_db: String,
}
