//! The log facility: serialized appends to the daily file
//!
//! All leveled operations funnel into a single append routine guarded by one
//! mutex, so concurrent callers produce whole, ordered lines. Write failures
//! are reported on the operator diagnostic stream and never surfaced to the
//! logging caller.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use backtrace::Backtrace;
use thiserror::Error;

use super::entry::{Entry, ErrorValue, Level};

/// Default log directory when none is configured
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Fatal initialization failure: the process must not serve without a
/// writable log directory.
#[derive(Debug, Error)]
pub enum FacilityInitError {
    #[error("failed to create log directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("log directory {dir} is not writable: {source}")]
    Unwritable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-write failure, recovered locally and never returned to the caller
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The process-wide log sink
///
/// Owns the log directory and the single mutex that serializes physical
/// writes. Readers (the viewer) never take this lock; they tolerate partial
/// trailing lines instead.
pub struct Facility {
    log_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl Facility {
    /// Create a facility, ensuring the log directory exists and is writable
    ///
    /// Initialization failure is fatal to startup; callers must abort rather
    /// than run without a log sink. A pre-existing directory is checked for
    /// writability too: a read-only directory would otherwise pass creation
    /// and then silently produce zero log files.
    pub fn new(log_dir: impl Into<PathBuf>) -> Result<Self, FacilityInitError> {
        let log_dir = log_dir.into();
        fs::create_dir_all(&log_dir).map_err(|source| FacilityInitError::CreateDir {
            dir: log_dir.clone(),
            source,
        })?;

        // Outside the ".log" namespace so the viewer never lists it
        let check = log_dir.join(".writable-check");
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&check)
            .map_err(|source| FacilityInitError::Unwritable {
                dir: log_dir.clone(),
                source,
            })?;
        let _ = fs::remove_file(&check);

        Ok(Self {
            log_dir,
            write_lock: Mutex::new(()),
        })
    }

    /// The directory this facility appends into
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Write an INFO entry
    pub fn info(&self, channel: &str, message: impl fmt::Display) {
        self.append(Entry::new(Level::Info, channel, message.to_string()));
    }

    /// Write a WARN entry
    pub fn warn(&self, channel: &str, message: impl fmt::Display) {
        self.append(Entry::new(Level::Warn, channel, message.to_string()));
    }

    /// Write an ERROR entry with a captured stack trace
    ///
    /// Accepts an error-like value, a preformatted message, or anything
    /// wrapped with [`ErrorValue::other`]; see [`ErrorValue`].
    pub fn error(&self, channel: &str, value: impl Into<ErrorValue>) {
        let entry = Entry::new(Level::Error, channel, value.into().into_message())
            .with_trace(capture_trace());
        self.append(entry);
    }

    /// Write a PANIC entry with a captured stack trace
    ///
    /// Used by the panic capture hook; also available to explicit top-level
    /// fault boundaries.
    pub fn panic(&self, channel: &str, message: impl fmt::Display) {
        let entry =
            Entry::new(Level::Panic, channel, message.to_string()).with_trace(capture_trace());
        self.append(entry);
    }

    /// Append one entry, swallowing write failures
    ///
    /// Logging must never become a cause of application failure: an
    /// open/write error goes to the operator diagnostic stream and the
    /// caller proceeds as if the write succeeded.
    pub(crate) fn append(&self, entry: Entry) {
        if let Err(e) = self.try_append(&entry) {
            tracing::error!("log append failed: {e}");
        }
    }

    fn try_append(&self, entry: &Entry) -> Result<(), WriteError> {
        // Sole synchronization point: all writers serialize here, so entries
        // appear in lock-acquisition order. A poisoned lock only means a
        // previous writer panicked mid-append; the file is still append-safe.
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let path = self.log_dir.join(entry.file_name());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| WriteError::Open {
                path: path.clone(),
                source,
            })?;

        // Single write call; the handle is dropped (closed) on every exit
        // path, so each entry is durable as soon as append returns.
        file.write_all(entry.render().as_bytes())
            .map_err(|source| WriteError::Write { path, source })
    }
}

/// Capture the current stack as renderable text
pub(crate) fn capture_trace() -> String {
    format!("{:?}", Backtrace::new())
}
