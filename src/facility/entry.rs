//! Log entry types and on-disk text rendering
//!
//! An [`Entry`] is rendered to text the moment it is written and never
//! stored; the format below is what any external viewer of the daily files
//! must be able to parse, so it is fixed byte-for-byte.

use std::fmt;

use chrono::{DateTime, Utc};

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Panic,
}

impl Level {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
        }
    }

    /// Check if entries at this level carry a stack trace
    pub fn captures_trace(&self) -> bool {
        matches!(self, Level::Error | Level::Panic)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The polymorphic value accepted by the error-level operation
///
/// Modeled as a closed variant so the formatting logic stays exhaustive:
/// an error-like value is rendered via its `Display` description, a
/// preformatted message is used as-is, and anything else goes through a
/// best-effort `Debug` conversion.
pub enum ErrorValue {
    /// An error-like value; the entry message is its description
    Error(Box<dyn std::error::Error + Send + Sync>),
    /// An already-formatted message
    Message(String),
    /// Anything else, converted with its `Debug` representation
    Other(String),
}

impl ErrorValue {
    /// Wrap an arbitrary non-error, non-string value
    pub fn other<T: fmt::Debug>(value: T) -> Self {
        ErrorValue::Other(format!("{:?}", value))
    }

    /// Render the entry message for this value
    pub fn into_message(self) -> String {
        match self {
            ErrorValue::Error(e) => e.to_string(),
            ErrorValue::Message(m) => m,
            ErrorValue::Other(o) => o,
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ErrorValue {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ErrorValue::Error(e)
    }
}

impl From<anyhow::Error> for ErrorValue {
    fn from(e: anyhow::Error) -> Self {
        ErrorValue::Error(e.into())
    }
}

impl From<std::io::Error> for ErrorValue {
    fn from(e: std::io::Error) -> Self {
        ErrorValue::Error(Box::new(e))
    }
}

impl From<String> for ErrorValue {
    fn from(m: String) -> Self {
        ErrorValue::Message(m)
    }
}

impl From<&str> for ErrorValue {
    fn from(m: &str) -> Self {
        ErrorValue::Message(m.to_string())
    }
}

impl From<fmt::Arguments<'_>> for ErrorValue {
    fn from(args: fmt::Arguments<'_>) -> Self {
        ErrorValue::Message(args.to_string())
    }
}

/// A single log entry, rendered to text at write time
#[derive(Debug, Clone)]
pub struct Entry {
    /// Timestamp the entry was recorded (UTC; also keys the daily file)
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: Level,
    /// Free-form caller-supplied tag grouping related entries
    pub channel: String,
    /// Formatted message
    pub message: String,
    /// Captured stack trace, present only for ERROR and PANIC entries
    pub trace: Option<String>,
}

impl Entry {
    /// Create an entry stamped with the current time
    pub fn new(level: Level, channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            channel: channel.into(),
            message: message.into(),
            trace: None,
        }
    }

    /// Attach a captured stack trace
    pub fn with_trace(mut self, trace: String) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Name of the daily file this entry belongs to, derived from its own
    /// timestamp so an entry near midnight never lands in a file whose name
    /// disagrees with its first line.
    pub fn file_name(&self) -> String {
        format!("{}.log", self.timestamp.format("%Y-%m-%d"))
    }

    /// Render the entry in the on-disk format:
    ///
    /// ```text
    /// [YYYY-MM-DD HH:MM:SS] [LEVEL] [channel] message
    /// ```
    ///
    /// followed by a `Traceback:` block when a stack trace is attached.
    /// Always newline-terminated.
    pub fn render(&self) -> String {
        let mut line = format!(
            "[{}] [{}] [{}] {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level,
            self.channel,
            self.message
        );
        if let Some(trace) = &self.trace {
            line.push_str("Traceback:\n");
            line.push_str(trace);
            if !trace.ends_with('\n') {
                line.push('\n');
            }
        }
        line
    }
}
