//! Per-run values threaded through the serializer

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;

/// Database name used when the export is read from stdin.
pub const DEFAULT_DATABASE_NAME: &str = "LastPass";

/// How the run timestamp is rendered in every `*Time`/`*Changed` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TimestampStyle {
    /// Local time, 12-hour clock, literal `Z` suffix. This is what
    /// lastpasscsv2keepassxml has always written; afternoon runs come out
    /// twelve hours early and the zone marker is wrong on non-UTC hosts.
    #[default]
    Legacy,
    /// UTC, 24-hour clock.
    #[value(name = "iso8601")]
    Iso8601,
}

impl TimestampStyle {
    pub fn format(self, at: DateTime<Local>) -> String {
        match self {
            TimestampStyle::Legacy => at.format("%Y-%m-%dT%I:%M:%SZ").to_string(),
            TimestampStyle::Iso8601 => at
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string(),
        }
    }
}

/// Values fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    database_name: String,
    timestamp: String,
}

impl RunContext {
    pub fn new(database_name: impl Into<String>, started_at: DateTime<Local>, style: TimestampStyle) -> Self {
        Self {
            database_name: database_name.into(),
            timestamp: style.format(started_at),
        }
    }

    /// Context stamped with the current time.
    pub fn now(database_name: impl Into<String>, style: TimestampStyle) -> Self {
        Self::new(database_name, Local::now(), style)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
