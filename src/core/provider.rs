//! Provider trait for log output destinations

use crate::core::entry::LogEntry;
use std::sync::Arc;

/// A sink that accepts log entries and is responsible for their eventual
/// output.
///
/// `add_log_entry` must never block on I/O and must never fail: entries a
/// provider cannot accept are silently discarded. Buffered providers only
/// append to their pending queue here; the actual write happens on the
/// provider's own background thread.
pub trait LogProvider: Send + Sync {
    fn add_log_entry(&self, entry: Arc<LogEntry>);
    fn name(&self) -> &str;
}
