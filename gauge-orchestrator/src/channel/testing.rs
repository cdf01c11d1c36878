//! In-memory execution channel for service tests
//!
//! Simulates just enough of the worker environment: a process table entry
//! for the worker, a crontab, and reachability.

use async_trait::async_trait;
use gauge_core::command::CommandLine;
use std::io::Write;
use std::sync::Mutex;

use super::{ChannelError, ExecChannel, ExecOutput};

#[derive(Default)]
pub(crate) struct FakeChannel {
    pub unreachable: bool,
    pub worker_running: bool,
    pub crontab: Mutex<Option<String>>,
    pub executed: Mutex<Vec<CommandLine>>,
    pub spawned: Mutex<Vec<CommandLine>>,
}

impl FakeChannel {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn running() -> Self {
        Self {
            worker_running: true,
            ..Default::default()
        }
    }

    pub fn with_crontab(table: &str) -> Self {
        Self {
            crontab: Mutex::new(Some(table.to_string())),
            ..Default::default()
        }
    }

    pub fn crontab(&self) -> Option<String> {
        self.crontab.lock().unwrap().clone()
    }

    pub fn spawned(&self) -> Vec<CommandLine> {
        self.spawned.lock().unwrap().clone()
    }

    fn respond(&self, cmd: &CommandLine, input: Option<&str>) -> Result<ExecOutput, ChannelError> {
        self.executed.lock().unwrap().push(cmd.clone());

        if self.unreachable {
            return Err(ChannelError::Unavailable("connection refused".to_string()));
        }

        let exit = |code: i32, stdout: &str, stderr: &str| ExecOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: code,
        };

        let tokens: Vec<&str> = cmd.tokens().iter().map(String::as_str).collect();
        let output = match tokens.as_slice() {
            ["true"] => exit(0, "", ""),
            ["pidof", _] if self.worker_running => exit(0, "42\n", ""),
            ["pidof", _] => exit(1, "", ""),
            ["crontab", "-l"] => match self.crontab.lock().unwrap().as_ref() {
                Some(table) => exit(0, table, ""),
                None => exit(1, "", "no crontab for root\n"),
            },
            ["crontab", "-"] => {
                *self.crontab.lock().unwrap() = Some(input.unwrap_or_default().to_string());
                exit(0, "", "")
            }
            _ => exit(127, "", "command not found\n"),
        };

        Ok(output)
    }
}

#[async_trait]
impl ExecChannel for FakeChannel {
    async fn run(&self, cmd: &CommandLine) -> Result<ExecOutput, ChannelError> {
        self.respond(cmd, None)
    }

    async fn run_with_input(
        &self,
        cmd: &CommandLine,
        input: &str,
    ) -> Result<ExecOutput, ChannelError> {
        self.respond(cmd, Some(input))
    }

    fn spawn_detached(&self, cmd: &CommandLine, mut log: std::fs::File) -> Result<(), ChannelError> {
        if self.unreachable {
            return Err(ChannelError::Unavailable("connection refused".to_string()));
        }
        writeln!(log, "started: {}", cmd)?;
        self.spawned.lock().unwrap().push(cmd.clone());
        Ok(())
    }
}
