//! Execution channel
//!
//! The narrow interface through which the control plane reaches the worker
//! environment: run a command there and capture its output, or start a
//! detached process whose output goes to a log artifact.
//!
//! All calls are bounded by a timeout so an unreachable environment degrades
//! the calling operation instead of hanging it.

mod container;

#[cfg(test)]
pub(crate) mod testing;

pub use container::ContainerChannel;

use async_trait::async_trait;
use gauge_core::command::CommandLine;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by an execution channel
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The environment could not be reached
    #[error("execution channel unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish within the configured bound
    #[error("execution channel call timed out after {0:?}")]
    Timeout(Duration),

    /// An empty command was submitted
    #[error("empty command")]
    EmptyCommand,

    #[error("execution channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured result of a command run inside the environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Remote execution interface to the worker environment
#[async_trait]
pub trait ExecChannel: Send + Sync {
    /// Runs `cmd` inside the environment and waits for it to finish
    async fn run(&self, cmd: &CommandLine) -> Result<ExecOutput, ChannelError>;

    /// Runs `cmd` inside the environment with `input` on its stdin
    async fn run_with_input(&self, cmd: &CommandLine, input: &str)
    -> Result<ExecOutput, ChannelError>;

    /// Starts `cmd` and returns as soon as it has been submitted
    ///
    /// `cmd` is a complete host command line already addressed at the
    /// environment (see [`gauge_core::command::Invocation::OnDemand`]).
    /// Both stdout and stderr go to `log`. There is no handle: the process
    /// cannot be awaited or cancelled through this interface.
    fn spawn_detached(&self, cmd: &CommandLine, log: std::fs::File) -> Result<(), ChannelError>;
}
