//! Pipeline schedules
//!
//! Schedules are five-field cron expressions (`min hour day-of-month month
//! day-of-week`) or one of the `@hourly`-style presets the orchestration
//! backend understands. An empty schedule means the pipeline only runs when
//! triggered manually.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while validating a schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid schedule expression '{0}': expected 5 cron fields")]
    InvalidExpression(String),

    #[error("Invalid value '{value}' in cron field '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Schedule frequency '{frequency}' is not allowed (allowed: {allowed})")]
    NotAllowed {
        frequency: ScheduleFrequency,
        allowed: String,
    },

    #[error("Unknown schedule option '{0}'")]
    UnknownOption(String),
}

/// Coarse classification of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleFrequency {
    RunOnce,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl ScheduleFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleFrequency::RunOnce => "run_once",
            ScheduleFrequency::Hourly => "hourly",
            ScheduleFrequency::Daily => "daily",
            ScheduleFrequency::Weekly => "weekly",
            ScheduleFrequency::Monthly => "monthly",
            ScheduleFrequency::Custom => "custom",
        }
    }
}

impl fmt::Display for ScheduleFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleFrequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "run_once" => Ok(ScheduleFrequency::RunOnce),
            "hourly" => Ok(ScheduleFrequency::Hourly),
            "daily" => Ok(ScheduleFrequency::Daily),
            "weekly" => Ok(ScheduleFrequency::Weekly),
            "monthly" => Ok(ScheduleFrequency::Monthly),
            "custom" => Ok(ScheduleFrequency::Custom),
            other => Err(ScheduleError::UnknownOption(other.to_string())),
        }
    }
}

/// Cron field names with their inclusive value ranges
const FIELDS: [(&str, u32, u32); 5] = [
    ("minute", 0, 59),
    ("hour", 0, 23),
    ("day-of-month", 1, 31),
    ("month", 1, 12),
    ("day-of-week", 0, 7),
];

/// Cron running every hour at `min`
pub fn hour_cron(min: u32) -> String {
    format!("{} * * * *", min)
}

/// Cron running every day at `hour:min`
pub fn day_cron(min: u32, hour: u32) -> String {
    format!("{} {} * * *", min, hour)
}

/// Cron running every week on `dow` at `hour:min`
pub fn week_cron(min: u32, hour: u32, dow: u32) -> String {
    format!("{} {} * * {}", min, hour, dow)
}

/// Default schedule of a new test-suite pipeline
pub fn default_test_suite_schedule() -> String {
    hour_cron(0)
}

/// Default schedule when feature limits are enforced
pub fn default_limited_schedule() -> String {
    week_cron(0, 0, 0)
}

/// Parses the schedule options advertised by the feature limits
pub fn parse_schedule_options<S: AsRef<str>>(
    options: &[S],
) -> Result<Vec<ScheduleFrequency>, ScheduleError> {
    options.iter().map(|o| o.as_ref().parse()).collect()
}

/// Validates a cron expression and classifies its frequency
pub fn classify(expression: &str) -> Result<ScheduleFrequency, ScheduleError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Ok(ScheduleFrequency::RunOnce);
    }

    if let Some(preset) = expression.strip_prefix('@') {
        return match preset.to_ascii_lowercase().as_str() {
            "once" => Ok(ScheduleFrequency::RunOnce),
            "hourly" => Ok(ScheduleFrequency::Hourly),
            "daily" | "midnight" => Ok(ScheduleFrequency::Daily),
            "weekly" => Ok(ScheduleFrequency::Weekly),
            "monthly" => Ok(ScheduleFrequency::Monthly),
            "yearly" | "annually" => Ok(ScheduleFrequency::Custom),
            _ => Err(ScheduleError::InvalidExpression(expression.to_string())),
        };
    }

    let fields: Vec<&str> = expression.split_whitespace().collect();
    if fields.len() != FIELDS.len() {
        return Err(ScheduleError::InvalidExpression(expression.to_string()));
    }

    for (value, (name, min, max)) in fields.iter().zip(FIELDS) {
        validate_field(name, value, min, max)?;
    }

    // '*' = every value, 'n' = one fixed value, 'x' = anything else
    let shape: Vec<char> = fields
        .iter()
        .map(|v| {
            if is_any(v) {
                '*'
            } else if is_fixed(v) {
                'n'
            } else {
                'x'
            }
        })
        .collect();

    let frequency = match shape.as_slice() {
        ['n', '*', '*', '*', '*'] => ScheduleFrequency::Hourly,
        ['n', 'n', '*', '*', '*'] => ScheduleFrequency::Daily,
        ['n', 'n', '*', '*', 'n'] => ScheduleFrequency::Weekly,
        ['n', 'n', 'n', '*', '*'] => ScheduleFrequency::Monthly,
        _ => ScheduleFrequency::Custom,
    };

    Ok(frequency)
}

/// A single value, numeric or named; only called on validated fields
fn is_fixed(value: &str) -> bool {
    !value.contains([',', '-', '/', '*'])
}

fn is_any(value: &str) -> bool {
    value == "*"
}

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Numeric value of one field token: a number, or a month/day name where
/// the field allows one (case-insensitive)
fn field_value(name: &str, token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }

    let token = token.to_ascii_lowercase();
    let (names, offset) = match name {
        "month" => (&MONTH_NAMES[..], 1),
        "day-of-week" => (&DAY_NAMES[..], 0),
        _ => return None,
    };
    names
        .iter()
        .position(|n| *n == token)
        .map(|i| i as u32 + offset)
}

/// Checks one cron field: `*`, numbers, names, ranges, lists and steps
fn validate_field(
    name: &'static str,
    value: &str,
    min: u32,
    max: u32,
) -> Result<(), ScheduleError> {
    let invalid = || ScheduleError::InvalidField {
        field: name,
        value: value.to_string(),
    };

    for item in value.split(',') {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };

        if let Some(step) = step {
            match step.parse::<u32>() {
                Ok(s) if s > 0 => {}
                _ => return Err(invalid()),
            }
        }

        if range == "*" {
            continue;
        }

        let bounds: Vec<&str> = range.split('-').collect();
        if bounds.is_empty() || bounds.len() > 2 {
            return Err(invalid());
        }
        for bound in &bounds {
            let n = field_value(name, bound).ok_or_else(invalid)?;
            if n < min || n > max {
                return Err(invalid());
            }
        }
    }

    Ok(())
}

/// Normalizes a submitted schedule
///
/// Returns `None` for an empty schedule (never an empty string). When
/// `allowed` is given, the schedule's frequency must be one of them.
pub fn normalize_schedule(
    schedule: &str,
    allowed: Option<&[ScheduleFrequency]>,
) -> Result<Option<String>, ScheduleError> {
    let frequency = classify(schedule)?;

    if let Some(allowed) = allowed {
        if !allowed.contains(&frequency) {
            let allowed = allowed
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ScheduleError::NotAllowed { frequency, allowed });
        }
    }

    let trimmed = schedule.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
