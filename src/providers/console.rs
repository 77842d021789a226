//! Console provider: buffered drain to standard output
//!
//! Entries are printed as a human-readable multi-line block:
//!
//! ```text
//! Date:        2025-06-01 12:00:00
//! State:       Info
//! Location:    server.handle_request:120
//! Thread:      3 - worker-1
//! Message:     listening on port 8080
//! ```
//!
//! Embedded newlines in the message (and exception text) are re-indented to
//! the label gutter so the block stays visually aligned.

use crate::core::entry::LogEntry;
use crate::core::error::Result;
use crate::core::level::LevelSet;
use crate::core::metrics::ProviderMetrics;
use crate::core::provider::LogProvider;
use crate::providers::drain::{BatchSink, DrainWorker};
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;

/// Width of the label column, including the trailing spaces after the label.
const GUTTER: usize = 13;

pub struct ConsoleLogProvider {
    levels: LevelSet,
    metrics: Arc<ProviderMetrics>,
    worker: DrainWorker,
}

impl ConsoleLogProvider {
    pub fn new(levels: LevelSet) -> Result<Self> {
        Self::with_colors(levels, true)
    }

    pub fn with_colors(levels: LevelSet, use_colors: bool) -> Result<Self> {
        let metrics = Arc::new(ProviderMetrics::new());
        let sink = ConsoleSink { use_colors };
        let worker = DrainWorker::spawn("log-console-outputter", sink, Arc::clone(&metrics))?;
        Ok(Self {
            levels,
            metrics,
            worker,
        })
    }

    pub fn metrics(&self) -> &ProviderMetrics {
        &self.metrics
    }
}

impl LogProvider for ConsoleLogProvider {
    fn add_log_entry(&self, entry: Arc<LogEntry>) {
        if !self.levels.contains(entry.level) {
            return;
        }
        self.worker.queue().push(entry);
    }

    fn name(&self) -> &str {
        "console"
    }
}

struct ConsoleSink {
    use_colors: bool,
}

impl BatchSink for ConsoleSink {
    fn write_batch(&mut self, batch: &[Arc<LogEntry>]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for entry in batch {
            writeln!(out, "{}", format_block(entry, self.use_colors))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Re-indent continuation lines so they line up under the label gutter.
fn indent_continuations(text: &str) -> String {
    text.replace('\n', &format!("\n{}", " ".repeat(GUTTER)))
}

fn labeled(label: &str, value: &str) -> String {
    format!("{:<width$}{}", label, value, width = GUTTER)
}

/// The multi-line console rendering of one entry.
fn format_block(entry: &LogEntry, use_colors: bool) -> String {
    let state = format!("{:<5}", entry.level.as_str());
    let state = if use_colors {
        state.color(entry.level.color_code()).to_string()
    } else {
        state
    };

    let location = format!(
        "{}.{}:{}",
        entry.source_file_stem(),
        entry.member_name,
        entry.source_line_number
    );
    let thread = format!("{} - {}", entry.thread_id, entry.thread_name);

    let mut block = format!(
        "{}\n{}\n{}\n{}\n{}",
        labeled("Date:", &entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
        labeled("State:", &state),
        labeled("Location:", &location),
        labeled("Thread:", &thread),
        indent_continuations(&labeled("Message:", &entry.message)),
    );
    if let Some(exception) = &entry.exception {
        block.push('\n');
        block.push_str(&indent_continuations(&labeled("Exception:", exception)));
    }
    block
}
