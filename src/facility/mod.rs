//! The process-wide log facility
//!
//! Leveled entries are appended to one file per calendar day under the log
//! directory. A single [`Facility`] instance exists per process; it is
//! created by [`init`] at startup (or lazily with the default directory on
//! first macro use) and lives for the process lifetime.

mod entry;
mod panic_hook;
mod writer;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use entry::{Entry, ErrorValue, Level};
pub use panic_hook::install_panic_capture;
pub use writer::{Facility, FacilityInitError, WriteError, DEFAULT_LOG_DIR};

static INSTANCE: OnceLock<Facility> = OnceLock::new();

/// Initialize the process-wide facility
///
/// Idempotent and safe under concurrent first use: every caller gets the
/// same instance, and a lost race only means a redundant (idempotent)
/// directory creation. Directory-creation failure is fatal; the caller must
/// abort startup.
pub fn init(log_dir: impl Into<PathBuf>) -> Result<&'static Facility, FacilityInitError> {
    if let Some(existing) = INSTANCE.get() {
        return Ok(existing);
    }
    let facility = Facility::new(log_dir)?;
    Ok(INSTANCE.get_or_init(|| facility))
}

/// Get the facility if it has been initialized
pub fn try_global() -> Option<&'static Facility> {
    INSTANCE.get()
}

/// Get the facility, initializing it with [`DEFAULT_LOG_DIR`] on first use
///
/// Panics if the default log directory cannot be created, matching the
/// fail-fast contract of [`init`]: the process must not run without a log
/// sink.
pub fn global() -> &'static Facility {
    INSTANCE.get_or_init(|| match Facility::new(DEFAULT_LOG_DIR) {
        Ok(facility) => facility,
        Err(e) => panic!("cannot initialize log facility: {e}"),
    })
}

/// Write an INFO entry through the process-wide facility
///
/// ```no_run
/// loglens::log_info!("payments", "charge {} succeeded", 42);
/// ```
#[macro_export]
macro_rules! log_info {
    ($channel:expr, $($arg:tt)*) => {
        $crate::facility::global().info($channel, ::std::format_args!($($arg)*))
    };
}

/// Write a WARN entry through the process-wide facility
#[macro_export]
macro_rules! log_warn {
    ($channel:expr, $($arg:tt)*) => {
        $crate::facility::global().warn($channel, ::std::format_args!($($arg)*))
    };
}

/// Write an ERROR entry (with stack trace) through the process-wide facility
///
/// Accepts either a format string with arguments or a single value
/// convertible into [`ErrorValue`] (an error type, a `String`, a `&str`).
#[macro_export]
macro_rules! log_error {
    ($channel:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::facility::global().error($channel, ::std::format!($fmt, $($arg)+))
    };
    ($channel:expr, $value:expr) => {
        $crate::facility::global().error($channel, $value)
    };
}
