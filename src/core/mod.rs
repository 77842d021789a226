//! Core logger types and traits

pub mod entry;
pub mod error;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod provider;

pub use entry::{CallSite, LogEntry};
pub use error::{LoggerError, Result};
pub use level::{LevelSet, LogLevel};
pub use logger::{Logger, ProviderCallback};
pub use metrics::ProviderMetrics;
pub use provider::LogProvider;
