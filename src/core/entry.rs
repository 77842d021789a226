//! Log entry structure and call-site metadata

use crate::core::level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

// Thread ids are process-wide integers handed out on first use per thread
// and cached thread-locally to avoid repeated lookups.
static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
    static THREAD_NAME: String =
        std::thread::current().name().unwrap_or_default().to_string();
}

fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

fn current_thread_name() -> String {
    THREAD_NAME.with(|name| name.clone())
}

/// Identifies the code location a log statement was issued from.
///
/// Built explicitly by the caller, usually through the crate's logging macros
/// which capture `module_path!()`, `file!()` and `line!()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub member_name: String,
    pub source_file_path: String,
    pub source_line_number: u32,
}

impl CallSite {
    pub fn new(
        member_name: impl Into<String>,
        source_file_path: impl Into<String>,
        source_line_number: u32,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            source_file_path: source_file_path.into(),
            source_line_number,
        }
    }
}

/// A single logging incident and all details related to it.
///
/// Immutable once constructed; providers share one entry via `Arc` and may
/// read it concurrently without synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
    /// Pre-serialized error detail (message, cause chain, optional frames),
    /// supplied as plain text by the call site. `None` when no error is
    /// attached.
    pub exception: Option<String>,
    pub member_name: String,
    pub source_file_path: String,
    pub source_line_number: u32,
    pub thread_id: u64,
    pub thread_name: String,
    /// UTC instant assigned at creation.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<String>,
        call_site: CallSite,
    ) -> Self {
        Self {
            message: message.into(),
            level,
            exception,
            member_name: call_site.member_name,
            source_file_path: call_site.source_file_path,
            source_line_number: call_site.source_line_number,
            thread_id: current_thread_id(),
            thread_name: current_thread_name(),
            timestamp: Utc::now(),
        }
    }

    /// Override the creation timestamp. Intended for deterministic tests,
    /// e.g. exercising day rollover with entries on either side of midnight.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The source file name without directory or extension, as shown in the
    /// console `Location:` field.
    pub fn source_file_stem(&self) -> &str {
        std::path::Path::new(&self.source_file_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}
