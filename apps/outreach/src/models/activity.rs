use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_DAILY_LIMIT: u32 = 20;

/// Display counters. `emails_sent` is bumped locally per successful send;
/// the gateway's value replaces it on every profile load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub pdf_count: u32,
    pub emails_sent: u32,
    pub daily_limit: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            pdf_count: 0,
            emails_sent: 0,
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// Append-only activity log, newest entry first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
    }

    /// Replaces the log with entries already ordered newest first.
    pub fn replace(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries.into();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
