//! Diagnostic sinks.
//!
//! Soft failures (a value that is skipped rather than propagated) are
//! reported to a sink instead of being lost silently.

use std::sync::Mutex;

/// Receiver of soft-failure reports.
pub trait DiagnosticSink: Send + Sync {
    /// Reports that the value under `key` was skipped.
    fn report(&self, key: &str, message: &str);
}

/// Forwards reports to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, key: &str, message: &str) {
        tracing::warn!(key = %key, "skipped value: {message}");
    }
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far as `(key, message)` pairs.
    #[must_use]
    pub fn reports(&self) -> Vec<(String, String)> {
        match self.reports.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True when nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.reports().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, key: &str, message: &str) {
        let mut guard = match self.reports.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((key.to_string(), message.to_string()));
    }
}
