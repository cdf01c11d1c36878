//! Launch Service
//!
//! Starts worker runs through the execution channel. A launch is one-way:
//! it returns once the worker has been submitted and never waits for it.
//!
//! Launches are not serialized. Two launches in quick succession start two
//! overlapping workers that both append to the same log. Run state is not
//! recorded here either; it is only ever observed by the status service.

use gauge_core::command::{CommandLine, Invocation, WorkerProfile, synthesize};
use gauge_core::domain::config::RunConfiguration;
use std::path::Path;

use super::{Result, ServiceError};
use crate::channel::ExecChannel;
use crate::repository::artifact_repository;

/// Submit `cmd` for fire-and-forget execution
///
/// The environment is probed first so that an unreachable channel is
/// reported to the caller. There is no retry.
pub async fn launch(channel: &dyn ExecChannel, cmd: &CommandLine, log_path: &Path) -> Result<()> {
    let probe = channel.run(&CommandLine::new(["true"])).await?;
    if !probe.success() {
        return Err(ServiceError::ChannelUnavailable(format!(
            "Worker environment is not reachable (exit code {}): {}",
            probe.exit_code,
            probe.stderr.trim()
        )));
    }

    let log = artifact_repository::open_append(log_path).await?;
    channel.spawn_detached(cmd, log)?;

    tracing::info!("Worker launched, output to {}", log_path.display());
    Ok(())
}

/// Synthesize the on-demand command for `config` and launch it
pub async fn run_now(
    channel: &dyn ExecChannel,
    profile: &WorkerProfile,
    config: &RunConfiguration,
    log_path: &Path,
) -> Result<CommandLine> {
    let cmd = synthesize(config, profile, Invocation::OnDemand);
    tracing::debug!("Synthesized worker command: {}", cmd);

    launch(channel, &cmd, log_path).await?;
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::testing::FakeChannel;
    use crate::config::Settings;
    use gauge_core::domain::config::Mode;

    #[tokio::test]
    async fn test_launch_submits_and_returns() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("speedtest.log");
        let channel = FakeChannel::default();
        let cmd = CommandLine::new(["docker", "exec", "w", "python3", "worker.py"]);

        launch(&channel, &cmd, &log_path).await.unwrap();

        assert_eq!(channel.spawned(), vec![cmd]);
        let log = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert!(log.starts_with("started: docker exec w"));
    }

    #[tokio::test]
    async fn test_launch_on_unreachable_channel_fails() {
        let dir = tempfile::tempdir().unwrap();
        let channel = FakeChannel::unreachable();
        let cmd = CommandLine::new(["docker", "exec", "w", "python3"]);

        let err = launch(&channel, &cmd, &dir.path().join("speedtest.log"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::ChannelUnavailable(_)));
        assert!(channel.spawned().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_launches_share_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("speedtest.log");
        let channel = FakeChannel::default();
        let profile = Settings::default().worker_profile();
        let config = RunConfiguration::default();

        run_now(&channel, &profile, &config, &log_path).await.unwrap();
        run_now(&channel, &profile, &config, &log_path).await.unwrap();

        assert_eq!(channel.spawned().len(), 2);
        let log = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert_eq!(log.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_run_now_uses_on_demand_command() {
        let dir = tempfile::tempdir().unwrap();
        let channel = FakeChannel::default();
        let profile = Settings::default().worker_profile();
        let config = RunConfiguration {
            mode: Mode::Normal,
            ..Default::default()
        };

        let cmd = run_now(&channel, &profile, &config, &dir.path().join("log"))
            .await
            .unwrap();

        assert_eq!(cmd.program(), Some("docker"));
        assert_eq!(cmd.value_of("--mode"), Some("beginner"));
    }
}
