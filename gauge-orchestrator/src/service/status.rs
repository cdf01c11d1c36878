//! Status Service
//!
//! Derives the run state from the worker environment's process table on
//! every call. Nothing is cached.

use gauge_core::command::CommandLine;
use gauge_core::domain::run::RunState;

use crate::channel::ExecChannel;

/// Query whether a worker process is alive
///
/// Any failure of the query itself reads as [`RunState::Idle`], so a status
/// poll never fails.
pub async fn status(channel: &dyn ExecChannel, worker_process: &str) -> RunState {
    let query = CommandLine::new(["pidof", worker_process]);

    match channel.run(&query).await {
        Ok(output) if output.success() => RunState::Running,
        Ok(_) => RunState::Idle,
        Err(e) => {
            tracing::warn!("Status query failed, reporting idle: {}", e);
            RunState::Idle
        }
    }
}
