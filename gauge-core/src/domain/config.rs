//! Run configuration domain types
//!
//! `RunConfiguration` is the single source of truth for how a worker run is
//! built. It is read from a persisted JSON document, merged over defaults, and
//! passed by value into every operation that needs it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Filename the worker writes its own results to. Selecting it as the proxy
/// source means "reuse the last results" rather than an uploaded file.
pub const CSV_SENTINEL: &str = "result.csv";

pub const DEFAULT_CRON_SCHEDULE: &str = "0 2 * * *";
pub const DEFAULT_GITHUB_FILE_PATH: &str = "cloudflare_ips.txt";

/// Worker measurement mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Beginner,
    Normal,
    Proxy,
}

impl Mode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Mode::Beginner),
            "normal" => Some(Mode::Normal),
            "proxy" => Some(Mode::Proxy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Beginner => "beginner",
            Mode::Normal => "normal",
            Mode::Proxy => "proxy",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the worker publishes its best results after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMethod {
    #[default]
    None,
    Api,
    Github,
}

impl UploadMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Some(UploadMethod::None),
            "api" => Some(UploadMethod::Api),
            "github" => Some(UploadMethod::Github),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMethod::None => "none",
            UploadMethod::Api => "api",
            UploadMethod::Github => "github",
        }
    }
}

impl fmt::Display for UploadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a worker run
///
/// Deserialization never fails: the document is merged field by field over
/// [`RunConfiguration::default`], and any field that is missing or cannot be
/// interpreted keeps its default. Unknown keys are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct RunConfiguration {
    pub mode: Mode,
    pub ipv6: bool,
    pub count: u32,
    #[serde(rename = "speed")]
    pub speed_threshold_mbs: f64,
    #[serde(rename = "delay")]
    pub delay_threshold_ms: u32,
    #[serde(rename = "thread")]
    pub thread_count: u32,
    pub region: String,
    #[serde(rename = "csv_file")]
    pub csv_source: String,
    pub upload_method: UploadMethod,
    pub upload_count: u32,
    #[serde(rename = "clear")]
    pub clear_before_upload: bool,
    #[serde(rename = "worker_domains")]
    pub api_worker_domains: String,
    #[serde(rename = "uuids")]
    pub api_uuids: String,
    pub github_token: String,
    #[serde(rename = "repo")]
    pub github_repo: String,
    #[serde(rename = "file_path")]
    pub github_file_path: String,
    pub cron_schedule: String,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            mode: Mode::Beginner,
            ipv6: false,
            count: 10,
            speed_threshold_mbs: 1.0,
            delay_threshold_ms: 1000,
            thread_count: 200,
            region: String::new(),
            csv_source: CSV_SENTINEL.to_string(),
            upload_method: UploadMethod::None,
            upload_count: 10,
            clear_before_upload: false,
            api_worker_domains: String::new(),
            api_uuids: String::new(),
            github_token: String::new(),
            github_repo: String::new(),
            github_file_path: DEFAULT_GITHUB_FILE_PATH.to_string(),
            cron_schedule: DEFAULT_CRON_SCHEDULE.to_string(),
        }
    }
}

impl From<Value> for RunConfiguration {
    fn from(document: Value) -> Self {
        let mut config = Self::default();
        if let Value::Object(map) = &document {
            config.merge(map);
        }
        config
    }
}

impl RunConfiguration {
    /// Overlays every recognised key of `doc` onto `self`
    pub fn merge(&mut self, doc: &Map<String, Value>) {
        if let Some(mode) = doc.get("mode").and_then(as_text).and_then(|s| Mode::parse(&s)) {
            self.mode = mode;
        }
        merge_field(doc, "ipv6", as_bool, &mut self.ipv6);
        merge_field(doc, "count", as_u32, &mut self.count);
        merge_field(doc, "speed", as_f64, &mut self.speed_threshold_mbs);
        merge_field(doc, "delay", as_u32, &mut self.delay_threshold_ms);
        merge_field(doc, "thread", as_u32, &mut self.thread_count);
        merge_field(doc, "region", as_text, &mut self.region);
        merge_field(doc, "csv_file", as_text, &mut self.csv_source);
        if let Some(method) = doc
            .get("upload_method")
            .and_then(as_text)
            .and_then(|s| UploadMethod::parse(&s))
        {
            self.upload_method = method;
        }
        merge_field(doc, "upload_count", as_u32, &mut self.upload_count);
        merge_field(doc, "clear", as_bool, &mut self.clear_before_upload);
        merge_field(doc, "worker_domains", as_text, &mut self.api_worker_domains);
        merge_field(doc, "uuids", as_text, &mut self.api_uuids);
        merge_field(doc, "github_token", as_text, &mut self.github_token);
        merge_field(doc, "repo", as_text, &mut self.github_repo);
        merge_field(doc, "file_path", as_text, &mut self.github_file_path);
        merge_field(doc, "cron_schedule", as_text, &mut self.cron_schedule);
    }

    /// Mode actually used for an invocation
    ///
    /// `normal` without a region silently becomes `beginner`. The stored
    /// configuration is left untouched.
    pub fn effective_mode(&self) -> Mode {
        match self.mode {
            Mode::Normal if self.region.trim().is_empty() => Mode::Beginner,
            mode => mode,
        }
    }
}

fn merge_field<T>(
    doc: &Map<String, Value>,
    key: &str,
    read: fn(&Value) -> Option<T>,
    target: &mut T,
) {
    if let Some(value) = doc.get(key).and_then(read) {
        *target = value;
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n >= 0.0).then_some(n)
}

fn as_u32(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let n = as_f64(value)?;
    (n.fract() == 0.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}
