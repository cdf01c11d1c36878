//! Container runtime execution channel
//!
//! Reaches the worker environment through the container runtime CLI
//! (`docker exec` / `podman exec`).

use async_trait::async_trait;
use gauge_core::command::CommandLine;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{ChannelError, ExecChannel, ExecOutput};

/// Execution channel backed by a running container
pub struct ContainerChannel {
    runtime: String,
    container: String,
    timeout: Duration,
}

impl ContainerChannel {
    /// Creates a new container channel
    ///
    /// # Arguments
    /// * `runtime` - Container runtime CLI (e.g. `docker`, `podman`)
    /// * `container` - Name of the container hosting the worker
    /// * `timeout` - Upper bound for each `run` call
    pub fn new(runtime: impl Into<String>, container: impl Into<String>, timeout: Duration) -> Self {
        Self {
            runtime: runtime.into(),
            container: container.into(),
            timeout,
        }
    }

    /// Checks that the runtime CLI is installed
    pub async fn check_runtime_available(&self) -> Result<(), ChannelError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.runtime).arg("--version").output(),
        )
        .await
        .map_err(|_| ChannelError::Timeout(self.timeout))?
        .map_err(|e| {
            ChannelError::Unavailable(format!("failed to execute '{} --version': {}", self.runtime, e))
        })?;

        if !output.status.success() {
            return Err(ChannelError::Unavailable(format!(
                "{} is not working correctly",
                self.runtime
            )));
        }

        info!(
            "Container runtime available: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }

    async fn exec(&self, cmd: &CommandLine, input: Option<&str>) -> Result<ExecOutput, ChannelError> {
        if cmd.is_empty() {
            return Err(ChannelError::EmptyCommand);
        }

        debug!("Executing in container {}: {}", self.container, cmd);

        let mut command = Command::new(&self.runtime);
        command.arg("exec");
        if input.is_some() {
            command.arg("-i");
        }
        command
            .arg(&self.container)
            .args(cmd.tokens())
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| {
            ChannelError::Unavailable(format!("failed to execute {} exec: {}", self.runtime, e))
        })?;

        let run = async {
            if let (Some(input), Some(mut stdin)) = (input, child.stdin.take()) {
                stdin.write_all(input.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            child.wait_with_output().await
        };

        let output = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| ChannelError::Timeout(self.timeout))??;

        let result = ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if result.success() {
            debug!(
                "Command completed: exit_code={}, stdout_len={}",
                result.exit_code,
                result.stdout.len()
            );
        } else {
            debug!(
                "Command failed in container {}: exit_code={} stderr='{}'",
                self.container,
                result.exit_code,
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}

#[async_trait]
impl ExecChannel for ContainerChannel {
    async fn run(&self, cmd: &CommandLine) -> Result<ExecOutput, ChannelError> {
        self.exec(cmd, None).await
    }

    async fn run_with_input(
        &self,
        cmd: &CommandLine,
        input: &str,
    ) -> Result<ExecOutput, ChannelError> {
        self.exec(cmd, Some(input)).await
    }

    fn spawn_detached(&self, cmd: &CommandLine, log: std::fs::File) -> Result<(), ChannelError> {
        let program = cmd.program().ok_or(ChannelError::EmptyCommand)?;
        let stderr_log = log.try_clone()?;

        let mut child = Command::new(program)
            .args(cmd.args())
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr_log))
            .spawn()
            .map_err(|e| ChannelError::Unavailable(format!("failed to spawn {}: {}", program, e)))?;

        let pid = child.id();
        info!("Worker submitted (pid {:?}): {}", pid, cmd);

        // Reap the child so it never lingers as a zombie.
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => info!("Worker process {:?} exited with {}", pid, status),
                Err(e) => warn!("Failed to wait for worker process {:?}: {}", pid, e),
            }
        });

        Ok(())
    }
}
