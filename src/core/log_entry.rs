//! Log entry structure

use super::attr::Attr;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Program location a record was logged from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }
}

/// A single event handed to a handler.
///
/// `time` is `None` when the producer did not stamp the event; such records are
/// rendered without a `time` field.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub time: Option<DateTime<Utc>>,
    pub source: Option<SourceLocation>,
    pub attrs: Vec<Attr>,
}

impl LogEntry {
    /// New entry stamped with the current time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            time: Some(Utc::now()),
            source: None,
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_time(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_location(mut self, function: &str, file: &str, line: u32) -> Self {
        self.source = Some(SourceLocation::new(function, file, line));
        self
    }

    #[must_use]
    pub fn with_attr(mut self, attr: Attr) -> Self {
        self.attrs.push(attr);
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Number of attributes carried by the entry itself, absent ones included
    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
