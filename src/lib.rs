//! # buflog
//!
//! A buffered asynchronous logging facility: call sites stamp leveled
//! entries and return immediately; each provider drains its own pending
//! queue on a dedicated background thread.
//!
//! ## Features
//!
//! - **Non-blocking call sites**: enqueueing takes a short-held mutex, never I/O
//! - **Pluggable providers**: console, daily-rollover file, in-process events
//! - **Best-effort durability**: failed batches retry ahead of newer entries
//! - **Thread safe**: designed for concurrent callers

pub mod config;
pub mod core;
pub mod macros;
pub mod providers;

pub mod prelude {
    pub use crate::config::{FileProviderSettings, LoggingConfig, ProviderSettings};
    pub use crate::core::{
        CallSite, LevelSet, LogEntry, LogLevel, LogProvider, Logger, LoggerError,
        ProviderCallback, ProviderMetrics, Result,
    };
    pub use crate::providers::{ConsoleLogProvider, EventFiringLogProvider, FileWritingLogProvider};
}

pub use config::{FileProviderSettings, LoggingConfig, ProviderSettings};
pub use core::{
    CallSite, LevelSet, LogEntry, LogLevel, LogProvider, Logger, LoggerError, ProviderCallback,
    ProviderMetrics, Result,
};
pub use providers::{ConsoleLogProvider, EventFiringLogProvider, FileWritingLogProvider};
