//! Injectable warning sink
//!
//! The SDK degrades gracefully in exactly one place (an unmatched status
//! label during a task move); the warning it emits goes through this seam so
//! embedders can route it and test harnesses can assert on it.

use std::sync::Mutex;

/// Sink for non-fatal warnings emitted by the SDK.
pub trait WarnSink: Send + Sync {
    /// Record one warning message.
    fn warn(&self, message: &str);
}

/// Default sink forwarding warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWarnSink;

impl WarnSink for TracingWarnSink {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "odoo_client", "{message}");
    }
}

/// Sink that discards all warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWarnSink;

impl WarnSink for NoopWarnSink {
    fn warn(&self, _message: &str) {}
}

/// Sink that buffers warnings for later inspection, for test harnesses.
#[derive(Debug, Default)]
pub struct BufferWarnSink {
    messages: Mutex<Vec<String>>,
}

impl BufferWarnSink {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings recorded so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl WarnSink for BufferWarnSink {
    fn warn(&self, message: &str) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_string());
        }
    }
}
