//! Event-firing provider: synchronous in-process fan-out
//!
//! Unlike the buffered providers this one has no queue or worker thread;
//! subscribers run on the caller's thread, so they should be cheap. A
//! panicking subscriber is isolated and swallowed.

use crate::core::entry::LogEntry;
use crate::core::level::LevelSet;
use crate::core::provider::LogProvider;
use parking_lot::RwLock;
use std::sync::Arc;

pub type LogSubscriber = Arc<dyn Fn(&LogEntry) + Send + Sync>;

pub struct EventFiringLogProvider {
    levels: LevelSet,
    subscribers: RwLock<Vec<LogSubscriber>>,
}

impl EventFiringLogProvider {
    pub fn new(levels: LevelSet) -> Self {
        Self {
            levels,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Register a callback invoked for every accepted entry.
    pub fn subscribe(&self, subscriber: LogSubscriber) {
        self.subscribers.write().push(subscriber);
    }
}

impl LogProvider for EventFiringLogProvider {
    fn add_log_entry(&self, entry: Arc<LogEntry>) {
        if !self.levels.contains(entry.level) {
            return;
        }
        let subscribers = self.subscribers.read();
        for subscriber in subscribers.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                subscriber(&entry);
            }));
            if result.is_err() {
                eprintln!("[buflog] event subscriber panicked; continuing");
            }
        }
    }

    fn name(&self) -> &str {
        "event-firing"
    }
}
