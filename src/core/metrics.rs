//! Per-provider counters for observability
//!
//! Tracks what a buffered provider has done with its entries. Counters are
//! informational only and never drive control flow.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ProviderMetrics {
    /// Entries durably written to the sink
    written: AtomicU64,

    /// Batches that failed to write and were re-queued for retry
    batches_retried: AtomicU64,

    /// Entries dropped outright (retry buffer overflow)
    dropped: AtomicU64,
}

impl ProviderMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            batches_retried: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_retried(&self) -> u64 {
        self.batches_retried.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn record_written(&self, count: u64) {
        self.written.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_batch_retried(&self) {
        self.batches_retried.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_dropped(&self, count: u64) {
        self.dropped.fetch_add(count, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ProviderMetrics::new();
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.batches_retried(), 0);
        assert_eq!(metrics.dropped(), 0);
    }

    #[test]
    fn test_recording() {
        let metrics = ProviderMetrics::new();
        metrics.record_written(3);
        metrics.record_written(2);
        metrics.record_batch_retried();
        metrics.record_dropped(7);

        assert_eq!(metrics.written(), 5);
        assert_eq!(metrics.batches_retried(), 1);
        assert_eq!(metrics.dropped(), 7);
    }
}
