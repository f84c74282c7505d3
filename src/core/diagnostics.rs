//! Internal diagnostic channel
//!
//! Failures inside the dispatch path (sink write errors, panicking filters,
//! missing layouts) must never surface through the application's own logging,
//! so they are reported here instead: plain stderr lines with a
//! `[cascade_log]` prefix. The channel carries the framework's `debug` and
//! `quiet` flags; both are plain atomics with defined initialization and are
//! restored to their defaults by [`Diagnostics::reset`].

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct Diagnostics {
    debug: AtomicBool,
    quiet: AtomicBool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable verbose internal tracing of the framework itself.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    pub fn is_debug(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Suppress all diagnostic output, including errors.
    pub fn set_quiet(&self, enabled: bool) {
        self.quiet.store(enabled, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    /// Restore both flags to their defaults (debug off, quiet off).
    pub fn reset(&self) {
        self.debug.store(false, Ordering::Relaxed);
        self.quiet.store(false, Ordering::Relaxed);
    }

    /// Internal trace line, emitted only when debug is on.
    pub fn debug_msg(&self, message: &str) {
        if self.is_debug() && !self.is_quiet() {
            eprintln!("[cascade_log] {}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("[cascade_log] WARN: {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("[cascade_log] ERROR: {}", message);
        }
    }
}
