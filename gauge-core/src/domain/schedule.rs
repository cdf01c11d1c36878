//! Schedule domain types
//!
//! The worker environment keeps a single recurring entry in its own crontab.
//! Writing a new entry replaces the whole table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::command::CommandLine;

/// Errors produced when building a crontab entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
    #[error("cron expression must not span multiple lines")]
    MultiLine,

    #[error("cron expression must have 5 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid cron field '{0}'")]
    InvalidField(String),

    #[error("scheduled command must not contain line breaks")]
    MultiLineCommand,
}

/// A five-field cron expression (`minute hour day month weekday`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CronExpr(String);

impl CronExpr {
    pub fn parse(expr: &str) -> Result<Self, CronError> {
        if expr.contains(['\n', '\r']) {
            return Err(CronError::MultiLine);
        }

        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(CronError::FieldCount(fields.len()));
        }

        if let Some(field) = fields.iter().find(|f| !is_valid_field(f)) {
            return Err(CronError::InvalidField(field.to_string()));
        }

        Ok(Self(fields.join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CronExpr {
    fn default() -> Self {
        Self(crate::domain::config::DEFAULT_CRON_SCHEDULE.to_string())
    }
}

impl FromStr for CronExpr {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CronExpr {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CronExpr> for String {
    fn from(expr: CronExpr) -> Self {
        expr.0
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lists of numbers, ranges, steps, `*` and three-letter month/day names
fn is_valid_field(field: &str) -> bool {
    let is_atom = |atom: &str| {
        !atom.is_empty()
            && (atom.chars().all(|c| c.is_ascii_digit())
                || (atom.len() == 3 && atom.chars().all(|c| c.is_ascii_alphabetic())))
    };

    field.split(',').all(|item| {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };
        if step.is_some_and(|s| s.is_empty() || !s.chars().all(|c| c.is_ascii_digit())) {
            return false;
        }

        range == "*" || {
            let bounds: Vec<&str> = range.split('-').collect();
            bounds.len() <= 2 && bounds.iter().all(|b| is_atom(b))
        }
    })
}

/// Contents of the worker environment's schedule table, read verbatim
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub raw: String,
    pub has_entry: bool,
}

impl ScheduleEntry {
    pub fn from_table(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let has_entry = !raw.trim().is_empty();
        Self { raw, has_entry }
    }
}

/// Builds the crontab line for a scheduled worker invocation
///
/// Output of every scheduled run is appended to `log_path` inside the worker
/// environment. Line breaks cannot be expressed in a crontab command and
/// are rejected. `%` is escaped, since cron would otherwise end the command
/// there.
pub fn schedule_line(
    expr: &CronExpr,
    command: &CommandLine,
    log_path: &str,
) -> Result<String, CronError> {
    let rendered = format!(
        "{} >> {} 2>&1",
        command.to_shell_string(),
        crate::command::shell_quote(log_path)
    );

    if rendered.contains(['\n', '\r']) {
        return Err(CronError::MultiLineCommand);
    }

    Ok(format!("{} {}", expr, rendered.replace('%', r"\%")))
}
