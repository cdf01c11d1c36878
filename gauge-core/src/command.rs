//! Worker command synthesis
//!
//! Turns a [`RunConfiguration`] into the argument list of a worker
//! invocation. Synthesis is pure and total: the same configuration and
//! profile always produce the same tokens, and nothing here can fail.
//!
//! Commands are kept as token lists until the last moment. On-demand runs
//! hand the tokens straight to the process API; only the schedule line is
//! rendered to shell text, with each token quoted.

use std::fmt;

use crate::domain::config::{CSV_SENTINEL, Mode, RunConfiguration, UploadMethod};

/// A command as an ordered list of argument tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a bare token
    pub fn push(&mut self, token: impl Into<String>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    /// Appends `--name value`
    pub fn arg(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.tokens.push(name.to_string());
        self.tokens.push(value.into());
        self
    }

    /// Appends `name` only when `enabled` is true
    pub fn flag(&mut self, name: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.tokens.push(name.to_string());
        }
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Program name (first token)
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Everything after the program name
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns true if `token` appears anywhere in the command
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Value following the first occurrence of `name`
    pub fn value_of(&self, name: &str) -> Option<&str> {
        let idx = self.tokens.iter().position(|t| t == name)?;
        self.tokens.get(idx + 1).map(String::as_str)
    }

    /// Renders the command for a POSIX shell, quoting every token that needs it
    pub fn to_shell_string(&self) -> String {
        self.tokens
            .iter()
            .map(|t| shell_quote(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Quotes a single token for a POSIX shell
///
/// Tokens made only of safe characters pass through unchanged; everything
/// else is wrapped in single quotes.
pub fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-.,/:=+@%".contains(c));

    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// How the worker is reached inside its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerProfile {
    /// Tokens that address the managed environment from the control plane,
    /// e.g. `docker exec cf-speedtest`
    pub exec_prefix: Vec<String>,

    /// Worker program and its fixed arguments, as run inside the environment
    pub worker_command: Vec<String>,

    /// Directory holding uploaded source files, as seen by the worker
    pub upload_dir: String,
}

/// Where a synthesized command will run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// Launched now from the control plane through the execution channel
    OnDemand,
    /// Run by the environment's own scheduler
    Scheduled,
}

/// Builds the worker command line for `config`
pub fn synthesize(
    config: &RunConfiguration,
    profile: &WorkerProfile,
    invocation: Invocation,
) -> CommandLine {
    let mut cmd = CommandLine::default();

    if invocation == Invocation::OnDemand {
        cmd.tokens.extend(profile.exec_prefix.iter().cloned());
    }
    cmd.tokens.extend(profile.worker_command.iter().cloned());

    let mode = config.effective_mode();
    cmd.arg("--mode", mode.as_str());
    if mode == Mode::Normal {
        cmd.arg("--region", config.region.trim());
    }

    cmd.flag("--ipv6", config.ipv6)
        .arg("--count", config.count.to_string())
        .arg("--speed", format_decimal(config.speed_threshold_mbs))
        .arg("--delay", config.delay_threshold_ms.to_string())
        .arg("--thread", config.thread_count.to_string());

    if mode == Mode::Proxy {
        if let Some(csv) = resolve_csv_source(&config.csv_source, &profile.upload_dir, invocation) {
            cmd.arg("--csv", csv);
        }
    }

    if config.upload_method != UploadMethod::None {
        cmd.arg("--upload", config.upload_method.as_str())
            .arg("--upload-count", config.upload_count.to_string())
            .flag("--clear", config.clear_before_upload);

        match config.upload_method {
            UploadMethod::Api => {
                cmd.arg("--worker-domain", config.api_worker_domains.as_str())
                    .arg("--uuid", config.api_uuids.as_str());
            }
            UploadMethod::Github => {
                cmd.arg("--token", config.github_token.as_str())
                    .arg("--repo", config.github_repo.as_str())
                    .arg("--file-path", config.github_file_path.as_str());
            }
            UploadMethod::None => {}
        }
    }

    cmd
}

/// Maps the configured proxy source to the path handed to `--csv`
///
/// The sentinel stays a bare filename for on-demand runs and is left to the
/// worker's own default for scheduled runs. Anything else names an uploaded
/// file and is rewritten into the upload directory.
fn resolve_csv_source(source: &str, upload_dir: &str, invocation: Invocation) -> Option<String> {
    let name = source.trim().rsplit(['/', '\\']).next().unwrap_or_default();

    if name.is_empty() || name == CSV_SENTINEL {
        return match invocation {
            Invocation::OnDemand => Some(CSV_SENTINEL.to_string()),
            Invocation::Scheduled => None,
        };
    }

    Some(format!("{}/{}", upload_dir.trim_end_matches('/'), name))
}

/// Formats a threshold so whole numbers keep one decimal place (`1.0`)
fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> WorkerProfile {
        WorkerProfile {
            exec_prefix: vec!["docker".into(), "exec".into(), "cf-speedtest".into()],
            worker_command: vec!["python3".into(), "/app/cloudflare_speedtest.py".into()],
            upload_dir: "/data/uploads".into(),
        }
    }

    fn count(cmd: &CommandLine, token: &str) -> usize {
        cmd.tokens().iter().filter(|t| *t == token).count()
    }

    /// Asserts `expected` appears in `cmd` as a contiguous run of tokens
    fn assert_contains_run(cmd: &CommandLine, expected: &[&str]) {
        let found = cmd
            .tokens()
            .windows(expected.len())
            .any(|w| w.iter().zip(expected).all(|(a, b)| a == b));
        assert!(found, "{:?} not found in {}", expected, cmd);
    }

    #[test]
    fn test_default_configuration() {
        let cmd = synthesize(&RunConfiguration::default(), &profile(), Invocation::OnDemand);
        assert_eq!(
            cmd.to_shell_string(),
            "docker exec cf-speedtest python3 /app/cloudflare_speedtest.py \
             --mode beginner --count 10 --speed 1.0 --delay 1000 --thread 200"
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let config = RunConfiguration {
            mode: Mode::Proxy,
            ipv6: true,
            csv_source: "mine.csv".into(),
            upload_method: UploadMethod::Github,
            github_token: "t0k'en".into(),
            ..Default::default()
        };

        for invocation in [Invocation::OnDemand, Invocation::Scheduled] {
            let a = synthesize(&config, &profile(), invocation);
            let b = synthesize(&config, &profile(), invocation);
            assert_eq!(a, b);
            assert_eq!(a.to_shell_string(), b.to_shell_string());
        }
    }

    #[test]
    fn test_normal_without_region_downgrades() {
        let config = RunConfiguration {
            mode: Mode::Normal,
            region: String::new(),
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);

        assert_eq!(cmd.value_of("--mode"), Some("beginner"));
        assert!(!cmd.contains("--region"));
        assert_eq!(config.mode, Mode::Normal);
    }

    #[test]
    fn test_normal_with_region() {
        let config = RunConfiguration {
            mode: Mode::Normal,
            region: "LAX".into(),
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);

        assert_contains_run(&cmd, &["--mode", "normal", "--region", "LAX", "--count"]);
    }

    #[test]
    fn test_ipv6_flag_presence() {
        let mut config = RunConfiguration::default();
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);
        assert_eq!(count(&cmd, "--ipv6"), 0);

        config.ipv6 = true;
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);
        assert_eq!(count(&cmd, "--ipv6"), 1);
    }

    #[test]
    fn test_proxy_with_uploaded_source_and_api_upload() {
        let config = RunConfiguration {
            mode: Mode::Proxy,
            csv_source: "mine.csv".into(),
            upload_method: UploadMethod::Api,
            api_worker_domains: "a.com,b.com".into(),
            api_uuids: "u1,u2".into(),
            upload_count: 3,
            clear_before_upload: true,
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);

        assert_eq!(cmd.value_of("--mode"), Some("proxy"));
        assert_contains_run(
            &cmd,
            &[
                "--csv",
                "/data/uploads/mine.csv",
                "--upload",
                "api",
                "--upload-count",
                "3",
                "--clear",
                "--worker-domain",
                "a.com,b.com",
                "--uuid",
                "u1,u2",
            ],
        );
        let mode_at = cmd.tokens().iter().position(|t| t == "--mode").unwrap();
        let csv_at = cmd.tokens().iter().position(|t| t == "--csv").unwrap();
        assert!(mode_at < csv_at);
    }

    #[test]
    fn test_proxy_sentinel_source() {
        let config = RunConfiguration {
            mode: Mode::Proxy,
            ..Default::default()
        };

        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);
        assert_eq!(cmd.value_of("--csv"), Some("result.csv"));

        let cmd = synthesize(&config, &profile(), Invocation::Scheduled);
        assert!(!cmd.contains("--csv"));
    }

    #[test]
    fn test_proxy_source_is_reduced_to_basename() {
        let config = RunConfiguration {
            mode: Mode::Proxy,
            csv_source: "../../etc/passwd.txt".into(),
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::Scheduled);
        assert_eq!(cmd.value_of("--csv"), Some("/data/uploads/passwd.txt"));
    }

    #[test]
    fn test_csv_ignored_outside_proxy_mode() {
        let config = RunConfiguration {
            csv_source: "mine.csv".into(),
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);
        assert!(!cmd.contains("--csv"));
    }

    #[test]
    fn test_upload_fields_left_empty_are_still_emitted() {
        let config = RunConfiguration {
            upload_method: UploadMethod::Api,
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);

        assert_eq!(cmd.value_of("--worker-domain"), Some(""));
        assert_eq!(cmd.value_of("--uuid"), Some(""));
        assert!(!cmd.contains("--clear"));
        assert!(cmd.to_shell_string().ends_with("--worker-domain '' --uuid ''"));
    }

    #[test]
    fn test_github_upload() {
        let config = RunConfiguration {
            upload_method: UploadMethod::Github,
            upload_count: 5,
            github_token: "ghp_secret".into(),
            github_repo: "me/ips".into(),
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);

        assert_contains_run(
            &cmd,
            &[
                "--upload",
                "github",
                "--upload-count",
                "5",
                "--token",
                "ghp_secret",
                "--repo",
                "me/ips",
                "--file-path",
                "cloudflare_ips.txt",
            ],
        );
        assert!(!cmd.contains("--worker-domain"));
    }

    #[test]
    fn test_no_upload_arguments_when_disabled() {
        let config = RunConfiguration {
            api_worker_domains: "a.com".into(),
            clear_before_upload: true,
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);

        for token in ["--upload", "--upload-count", "--clear", "--worker-domain"] {
            assert!(!cmd.contains(token), "unexpected {token}");
        }
    }

    #[test]
    fn test_scheduled_invocation_has_no_exec_prefix() {
        let cmd = synthesize(&RunConfiguration::default(), &profile(), Invocation::Scheduled);
        assert_eq!(cmd.program(), Some("python3"));
        assert!(!cmd.contains("docker"));
    }

    #[test]
    fn test_fractional_speed() {
        let config = RunConfiguration {
            speed_threshold_mbs: 2.5,
            ..Default::default()
        };
        let cmd = synthesize(&config, &profile(), Invocation::OnDemand);
        assert_eq!(cmd.value_of("--speed"), Some("2.5"));
    }

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("a.com,b.com"), "a.com,b.com");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("x;rm -rf /"), "'x;rm -rf /'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("$(id)"), "'$(id)'");
    }

    #[test]
    fn test_program_and_args() {
        let cmd = CommandLine::new(["pidof", "python3"]);
        assert_eq!(cmd.program(), Some("pidof"));
        assert_eq!(cmd.args(), ["python3".to_string()]);
        assert!(CommandLine::default().args().is_empty());
    }
}
