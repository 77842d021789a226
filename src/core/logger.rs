//! Logger: entry stamping, provider fan-out and the application instance

use crate::config::LoggingConfig;
use crate::core::entry::{CallSite, LogEntry};
use crate::core::error::Result;
use crate::core::level::{LevelSet, LogLevel};
use crate::core::provider::LogProvider;
use crate::providers::console::ConsoleLogProvider;
use crate::providers::event::EventFiringLogProvider;
use crate::providers::file::FileWritingLogProvider;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Callback fired when a provider is added to or removed from a logger.
pub type ProviderCallback = Arc<dyn Fn(&Arc<dyn LogProvider>) + Send + Sync>;

static APPLICATION_INSTANCE: Mutex<Option<Arc<Logger>>> = Mutex::new(None);

/// Owns a set of providers, stamps entries with thread/time context and fans
/// them out. One misbehaving provider can neither block delivery to the
/// others nor raise into the calling code.
pub struct Logger {
    providers: RwLock<Vec<Arc<dyn LogProvider>>>,
    provider_added: RwLock<Vec<ProviderCallback>>,
    provider_removed: RwLock<Vec<ProviderCallback>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
            provider_added: RwLock::new(Vec::new()),
            provider_removed: RwLock::new(Vec::new()),
        }
    }

    /// Wire up providers from configuration. Sections with no enabled levels
    /// are skipped; an uncreatable log directory is a fatal startup error.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let logger = Logger::new();

        // LevelSet::new only fails on an empty set, which here means the
        // provider is disabled rather than misconfigured.
        if let Ok(levels) = LevelSet::new(config.console.enabled_levels()) {
            logger.add_provider(Arc::new(ConsoleLogProvider::new(levels)?));
        }
        if let Ok(levels) = LevelSet::new(config.event_firing.enabled_levels()) {
            logger.add_provider(Arc::new(EventFiringLogProvider::new(levels)));
        }
        if let Ok(levels) = LevelSet::new(config.file_writing.levels.enabled_levels()) {
            logger.add_provider(Arc::new(FileWritingLogProvider::new(
                levels,
                config.file_writing.resolved_log_path(),
                config.file_writing.resolved_prefix(),
            )?));
        }

        Ok(logger)
    }

    /// The process-wide logger, built lazily from `LoggingConfig::default()`
    /// on first access. Configuration errors surface here and only here.
    pub fn application_instance() -> Result<Arc<Logger>> {
        let mut instance = APPLICATION_INSTANCE.lock();
        if let Some(logger) = instance.as_ref() {
            return Ok(Arc::clone(logger));
        }
        let logger = Arc::new(Logger::from_config(&LoggingConfig::default())?);
        *instance = Some(Arc::clone(&logger));
        Ok(logger)
    }

    /// Build the process-wide logger from an explicit configuration,
    /// replacing (and disposing) any existing instance.
    pub fn init_application_instance(config: &LoggingConfig) -> Result<Arc<Logger>> {
        let logger = Arc::new(Logger::from_config(config)?);
        Self::set_application_instance(Some(Arc::clone(&logger)));
        Ok(logger)
    }

    /// Replace the process-wide logger. The previous instance is dropped
    /// first, which joins its providers' drain threads once the last
    /// reference goes away.
    pub fn set_application_instance(logger: Option<Arc<Logger>>) {
        let mut instance = APPLICATION_INSTANCE.lock();
        // Assignment drops the previous instance before installing the new
        // one; its providers drain and join when the last reference goes.
        *instance = logger;
    }

    /// Snapshot of the registered providers, in registration order.
    pub fn providers(&self) -> Vec<Arc<dyn LogProvider>> {
        self.providers.read().clone()
    }

    /// Register a provider. Adding one that is already present (same `Arc`)
    /// is a no-op. Returns whether the set changed; observers are notified
    /// only on change.
    pub fn add_provider(&self, provider: Arc<dyn LogProvider>) -> bool {
        {
            let mut providers = self.providers.write();
            if providers.iter().any(|p| Arc::ptr_eq(p, &provider)) {
                return false;
            }
            providers.push(Arc::clone(&provider));
        }
        for callback in self.provider_added.read().iter() {
            callback(&provider);
        }
        true
    }

    /// Remove a provider. Removing one that is absent is a no-op. Returns
    /// whether the set changed; observers are notified only on change.
    pub fn remove_provider(&self, provider: &Arc<dyn LogProvider>) -> bool {
        {
            let mut providers = self.providers.write();
            let Some(index) = providers.iter().position(|p| Arc::ptr_eq(p, provider)) else {
                return false;
            };
            providers.remove(index);
        }
        for callback in self.provider_removed.read().iter() {
            callback(provider);
        }
        true
    }

    pub fn on_provider_added(&self, callback: ProviderCallback) {
        self.provider_added.write().push(callback);
    }

    pub fn on_provider_removed(&self, callback: ProviderCallback) {
        self.provider_removed.write().push(callback);
    }

    /// Stamp an entry and fan it out to every registered provider.
    ///
    /// Each provider call is isolated: a panic in one provider is swallowed
    /// and delivery continues with the rest.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        exception: Option<String>,
        call_site: CallSite,
    ) {
        let entry = Arc::new(LogEntry::new(level, message, exception, call_site));
        let providers = self.providers.read();
        for provider in providers.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                provider.add_log_entry(Arc::clone(&entry));
            }));
            if result.is_err() {
                eprintln!(
                    "[buflog] provider '{}' panicked while accepting an entry; continuing",
                    provider.name()
                );
            }
        }
    }

    pub fn error(&self, message: impl Into<String>, exception: Option<String>, call_site: CallSite) {
        self.log(LogLevel::Error, message, exception, call_site);
    }

    pub fn warn(&self, message: impl Into<String>, exception: Option<String>, call_site: CallSite) {
        self.log(LogLevel::Warning, message, exception, call_site);
    }

    pub fn info(&self, message: impl Into<String>, exception: Option<String>, call_site: CallSite) {
        self.log(LogLevel::Info, message, exception, call_site);
    }

    pub fn debug(&self, message: impl Into<String>, exception: Option<String>, call_site: CallSite) {
        self.log(LogLevel::Debug, message, exception, call_site);
    }

    pub fn trace(&self, message: impl Into<String>, exception: Option<String>, call_site: CallSite) {
        self.log(LogLevel::Trace, message, exception, call_site);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
