//! Orchestrator settings
//!
//! Defines where the control plane finds its artifacts and how it reaches
//! the worker environment. Values come from the environment with defaults
//! suited to the usual container deployment.

use std::path::PathBuf;
use std::time::Duration;

use gauge_core::command::WorkerProfile;

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address the HTTP API binds to
    pub bind_addr: String,

    /// Shared data directory (results, log, uploads)
    pub data_dir: PathBuf,

    /// Directory holding the persisted run configuration document
    pub config_dir: PathBuf,

    /// Name of the container hosting the worker
    pub container_name: String,

    /// Container runtime CLI used as the execution channel (docker, podman)
    pub container_runtime: String,

    /// Worker program and fixed arguments, as run inside the container
    pub worker_command: Vec<String>,

    /// Process name that identifies a running worker
    pub worker_process: String,

    /// Upload directory as seen from inside the container
    pub worker_upload_dir: String,

    /// Log file inside the container for scheduled runs
    pub schedule_log_path: String,

    /// Upper bound for every execution channel call
    pub exec_timeout: Duration,
}

impl Settings {
    /// Creates settings from environment variables
    ///
    /// Recognised variables (all optional):
    /// - GAUGE_BIND_ADDR (default: 0.0.0.0:5000)
    /// - DATA_DIR (default: /data)
    /// - CONFIG_DIR (default: /config)
    /// - CONTAINER_NAME (default: cf-speedtest)
    /// - CONTAINER_RUNTIME (default: docker)
    /// - WORKER_COMMAND (default: python3 /app/cloudflare_speedtest.py)
    /// - WORKER_PROCESS (default: python3)
    /// - WORKER_UPLOAD_DIR (default: /data/uploads)
    /// - SCHEDULE_LOG_PATH (default: /var/log/speedtest.log)
    /// - EXEC_TIMEOUT_SECS (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            bind_addr: var("GAUGE_BIND_ADDR").unwrap_or(defaults.bind_addr),
            data_dir: var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            config_dir: var("CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            container_name: var("CONTAINER_NAME").unwrap_or(defaults.container_name),
            container_runtime: var("CONTAINER_RUNTIME").unwrap_or(defaults.container_runtime),
            worker_command: var("WORKER_COMMAND")
                .map(|cmd| cmd.split_whitespace().map(str::to_string).collect())
                .unwrap_or(defaults.worker_command),
            worker_process: var("WORKER_PROCESS").unwrap_or(defaults.worker_process),
            worker_upload_dir: var("WORKER_UPLOAD_DIR").unwrap_or(defaults.worker_upload_dir),
            schedule_log_path: var("SCHEDULE_LOG_PATH").unwrap_or(defaults.schedule_log_path),
            exec_timeout: var("EXEC_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.exec_timeout),
        }
    }

    /// Validates the settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.container_name.trim().is_empty() {
            anyhow::bail!("container_name cannot be empty");
        }

        if self.container_runtime.trim().is_empty() {
            anyhow::bail!("container_runtime cannot be empty");
        }

        if self.worker_command.is_empty() {
            anyhow::bail!("worker_command cannot be empty");
        }

        if self.worker_process.trim().is_empty() {
            anyhow::bail!("worker_process cannot be empty");
        }

        if self.exec_timeout.is_zero() {
            anyhow::bail!("exec_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Results table written by the worker
    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join("result.csv")
    }

    /// Log artifact receiving on-demand worker output
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("speedtest.log")
    }

    /// Local directory for uploaded proxy source files
    pub fn upload_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    /// Persisted run configuration document
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// How synthesized commands address the worker
    pub fn worker_profile(&self) -> WorkerProfile {
        WorkerProfile {
            exec_prefix: vec![
                self.container_runtime.clone(),
                "exec".to_string(),
                self.container_name.clone(),
            ],
            worker_command: self.worker_command.clone(),
            upload_dir: self.worker_upload_dir.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            data_dir: PathBuf::from("/data"),
            config_dir: PathBuf::from("/config"),
            container_name: "cf-speedtest".to_string(),
            container_runtime: "docker".to_string(),
            worker_command: vec![
                "python3".to_string(),
                "/app/cloudflare_speedtest.py".to_string(),
            ],
            worker_process: "python3".to_string(),
            worker_upload_dir: "/data/uploads".to_string(),
            schedule_log_path: "/var/log/speedtest.log".to_string(),
            exec_timeout: Duration::from_secs(10),
        }
    }
}
