//! Best-effort last-resort fault capture
//!
//! Chains onto the process panic hook and records a PANIC-level entry with a
//! stack trace before delegating to the previous hook. Advisory telemetry
//! only: it skips silently when the facility is uninitialized and must never
//! itself panic or deadlock.

use std::any::Any;
use std::panic;
use std::sync::OnceLock;

static HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// Install the panic capture hook, once per process
///
/// Subsequent calls are no-ops. The previous hook still runs afterwards, so
/// the usual stderr panic report is preserved.
pub fn install_panic_capture() {
    if HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if let Some(facility) = super::try_global() {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown location".to_string());
            let payload = payload_summary(info.payload());
            // Write errors are already swallowed inside the facility, so
            // nothing here can raise further.
            facility.panic("default", format_args!("panic at {location}: {payload}"));
        }
        previous(info);
    }));
}

fn payload_summary(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
