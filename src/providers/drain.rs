//! Shared buffered-drain mechanism for the console and file providers
//!
//! Each buffered provider owns a lock-protected pending queue and a dedicated
//! background thread. Callers only ever append to the queue under a
//! short-held mutex; once per drain cycle the worker swaps the queue for an
//! empty one and performs the actual I/O outside the lock. A failed batch is
//! re-inserted at the front of the live queue so it is retried ahead of
//! anything enqueued since, preserving order.

use crate::core::entry::LogEntry;
use crate::core::error::Result;
use crate::core::metrics::ProviderMetrics;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Sleep between drain cycles when the queue was empty.
const IDLE_SLEEP: Duration = Duration::from_millis(100);

/// Sleep after every non-empty drain cycle. Throttles retry pressure and
/// I/O frequency.
const CYCLE_SLEEP: Duration = Duration::from_millis(50);

/// Upper bound on the live queue length when re-inserting a failed batch.
/// Under sustained write failure the retry buffer would otherwise grow
/// without bound; past this limit the failed batch is dropped instead.
const MAX_PENDING_RETRY: usize = 16_384;

/// Destination a drain worker writes its batches to. The sink is owned by
/// the worker thread exclusively; no other thread touches it.
pub(crate) trait BatchSink: Send {
    /// Write every entry of the batch, in order. Returning an error causes
    /// the whole batch to be re-queued for retry.
    fn write_batch(&mut self, batch: &[Arc<LogEntry>]) -> Result<()>;

    /// Called once after the worker observes the stop signal on an empty
    /// queue, before the thread exits.
    fn shutdown(&mut self) {}
}

/// The pending-entry queue shared between caller threads and one worker.
pub(crate) struct PendingQueue {
    entries: Mutex<Vec<Arc<LogEntry>>>,
    stop: AtomicBool,
    retry_capacity: usize,
}

impl PendingQueue {
    fn new(retry_capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Vec::new()),
            stop: AtomicBool::new(false),
            retry_capacity,
        })
    }

    /// Append one entry. Never blocks on I/O; the lock only guards the push.
    pub(crate) fn push(&self, entry: Arc<LogEntry>) {
        self.entries.lock().push(entry);
    }

    /// Swap the pending queue for a fresh empty one and return the frozen
    /// snapshot. Single critical section per drain cycle.
    fn swap(&self) -> Vec<Arc<LogEntry>> {
        std::mem::take(&mut *self.entries.lock())
    }

    /// Re-insert a failed batch at the front of the live queue, keeping it
    /// ahead of entries enqueued during the failed write attempt. Returns
    /// false (batch dropped) when doing so would exceed the retry bound.
    fn requeue_front(&self, batch: Vec<Arc<LogEntry>>) -> bool {
        let mut entries = self.entries.lock();
        if entries.len() + batch.len() > self.retry_capacity {
            return false;
        }
        entries.splice(0..0, batch);
        true
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

/// Handle to a provider's background drain thread. Dropping the worker
/// signals the loop to stop and joins it, blocking until the final drain
/// and sink shutdown complete.
pub(crate) struct DrainWorker {
    queue: Arc<PendingQueue>,
    handle: Option<JoinHandle<()>>,
}

impl DrainWorker {
    pub(crate) fn spawn<S: BatchSink + 'static>(
        thread_name: &str,
        sink: S,
        metrics: Arc<ProviderMetrics>,
    ) -> Result<Self> {
        Self::spawn_with_capacity(thread_name, sink, metrics, MAX_PENDING_RETRY)
    }

    fn spawn_with_capacity<S: BatchSink + 'static>(
        thread_name: &str,
        mut sink: S,
        metrics: Arc<ProviderMetrics>,
        retry_capacity: usize,
    ) -> Result<Self> {
        let queue = PendingQueue::new(retry_capacity);
        let worker_queue = Arc::clone(&queue);
        let worker_name = thread_name.to_string();

        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || loop {
                let batch = worker_queue.swap();
                if batch.is_empty() {
                    if worker_queue.stop.load(Ordering::Acquire) {
                        sink.shutdown();
                        break;
                    }
                    thread::sleep(IDLE_SLEEP);
                    continue;
                }

                match sink.write_batch(&batch) {
                    Ok(()) => metrics.record_written(batch.len() as u64),
                    Err(_) => {
                        metrics.record_batch_retried();
                        let count = batch.len() as u64;
                        if !worker_queue.requeue_front(batch) {
                            metrics.record_dropped(count);
                            eprintln!(
                                "[buflog] {}: retry buffer full, dropped {} entries",
                                worker_name, count
                            );
                        }
                    }
                }

                thread::sleep(CYCLE_SLEEP);
            })?;

        Ok(Self {
            queue,
            handle: Some(handle),
        })
    }

    pub(crate) fn queue(&self) -> &PendingQueue {
        &self.queue
    }
}

impl Drop for DrainWorker {
    fn drop(&mut self) {
        self.queue.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                eprintln!("[buflog] drain worker thread panicked during shutdown");
            }
        }
    }
}
