//! Provider implementations

pub mod console;
pub mod event;
pub mod file;

pub(crate) mod drain;

pub use console::ConsoleLogProvider;
pub use event::{EventFiringLogProvider, LogSubscriber};
pub use file::FileWritingLogProvider;

// Re-export the trait alongside its implementations.
pub use crate::core::LogProvider;
