//! Schedule Service
//!
//! Manages the recurring worker entry in the environment's crontab. The
//! table holds exactly one line written by this service; installing a new
//! schedule replaces the whole table, including entries created elsewhere.

use gauge_core::command::{CommandLine, Invocation, WorkerProfile, synthesize};
use gauge_core::domain::config::RunConfiguration;
use gauge_core::domain::schedule::{CronExpr, ScheduleEntry, schedule_line};

use super::{Result, ServiceError};
use crate::channel::ExecChannel;

/// Read the schedule table verbatim
///
/// A non-zero exit from `crontab -l` means no table is installed.
pub async fn get_schedule(channel: &dyn ExecChannel) -> Result<ScheduleEntry> {
    let output = channel.run(&CommandLine::new(["crontab", "-l"])).await?;

    if output.success() {
        Ok(ScheduleEntry::from_table(output.stdout))
    } else {
        tracing::debug!("No crontab installed: {}", output.stderr.trim());
        Ok(ScheduleEntry::default())
    }
}

/// Parse and validate a cron expression supplied by a caller
pub fn parse_expression(expr: &str) -> Result<CronExpr> {
    CronExpr::parse(expr)
        .map_err(|e| ServiceError::ValidationRejected(format!("Invalid cron expression: {}", e)))
}

/// Install `expr` running the worker with `config` as the entire table
///
/// Returns the installed line.
pub async fn set_schedule(
    channel: &dyn ExecChannel,
    profile: &WorkerProfile,
    expr: &CronExpr,
    config: &RunConfiguration,
    log_path: &str,
) -> Result<String> {
    let cmd = synthesize(config, profile, Invocation::Scheduled);
    let line = schedule_line(expr, &cmd, log_path)
        .map_err(|e| ServiceError::ValidationRejected(format!("Invalid schedule: {}", e)))?;

    let output = channel
        .run_with_input(&CommandLine::new(["crontab", "-"]), &format!("{}\n", line))
        .await?;

    if !output.success() {
        return Err(ServiceError::ChannelUnavailable(format!(
            "Failed to install schedule (exit code {}): {}",
            output.exit_code,
            output.stderr.trim()
        )));
    }

    tracing::info!("Schedule installed: {}", line);
    Ok(line)
}
