//! File provider: buffered drain with daily file rollover
//!
//! One file per calendar day, named `<prefix><YYYY-MM-DD>.log`, appended to
//! across process restarts. The open handle belongs exclusively to the drain
//! worker thread; before each entry is written its date (taken from the
//! entry's recorded timestamp, not the wall clock) is compared against the
//! date the handle was opened for, and the file is swapped out when they
//! differ. Records are single pipe-delimited lines.

use crate::core::entry::LogEntry;
use crate::core::error::{LoggerError, Result};
use crate::core::level::LevelSet;
use crate::core::metrics::ProviderMetrics;
use crate::core::provider::LogProvider;
use crate::providers::drain::{BatchSink, DrainWorker};
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

pub struct FileWritingLogProvider {
    levels: LevelSet,
    metrics: Arc<ProviderMetrics>,
    worker: DrainWorker,
}

impl FileWritingLogProvider {
    /// Create the provider, creating the log directory if necessary.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created; this is the one fatal
    /// startup error a file provider can produce.
    pub fn new(
        levels: LevelSet,
        directory: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| {
            LoggerError::file_provider(
                directory.display().to_string(),
                format!("could not create log directory: {}", e),
            )
        })?;

        let metrics = Arc::new(ProviderMetrics::new());
        let sink = RolloverSink {
            directory,
            prefix: prefix.into(),
            open: None,
        };
        let worker = DrainWorker::spawn("log-file-writer", sink, Arc::clone(&metrics))?;
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

impl LogProvider for FileWritingLogProvider {
    fn add_log_entry(&self, entry: Arc<LogEntry>) {
        if !self.levels.contains(entry.level) {
            return;
        }
        self.worker.queue().push(entry);
    }

    fn name(&self) -> &str {
        "file-writing"
    }
}

/// Manages the currently open output file by calendar day.
struct RolloverSink {
    directory: PathBuf,
    prefix: String,
    /// Open writer plus the UTC date it was opened for.
    open: Option<(BufWriter<File>, NaiveDate)>,
}

impl RolloverSink {
    fn file_path(&self, date: NaiveDate) -> PathBuf {
        self.directory
            .join(format!("{}{}.log", self.prefix, date.format("%Y-%m-%d")))
    }

    /// Return a writer positioned at the end of the file for `date`,
    /// rolling the previous file over if the day changed.
    fn writer_for(&mut self, date: NaiveDate) -> Result<&mut BufWriter<File>> {
        let needs_open = match &self.open {
            Some((_, open_date)) => *open_date != date,
            None => true,
        };
        if needs_open {
            if let Some((mut writer, _)) = self.open.take() {
                writer.flush()?;
                // Handle closed when the BufWriter drops here.
            }
            let path = self.file_path(date);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    LoggerError::file_provider(
                        path.display().to_string(),
                        format!("could not open log file: {}", e),
                    )
                })?;
            self.open = Some((BufWriter::new(file), date));
        }
        Ok(&mut self
            .open
            .as_mut()
            .ok_or_else(|| LoggerError::writer("log file writer not initialized"))?
            .0)
    }
}

impl BatchSink for RolloverSink {
    fn write_batch(&mut self, batch: &[Arc<LogEntry>]) -> Result<()> {
        for entry in batch {
            let date = entry.timestamp.date_naive();
            let writer = self.writer_for(date)?;
            writer.write_all(format_record(entry).as_bytes())?;
        }
        // Flush once per drained batch, not per line.
        if let Some((writer, _)) = &mut self.open {
            writer.flush()?;
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some((mut writer, _)) = self.open.take() {
            let _ = writer.flush();
        }
    }
}

/// Strip characters that would break the single-line, pipe-delimited record:
/// CR and LF become literal escapes, pipes are removed.
fn sanitize_field(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n").replace('|', "")
}

/// One pipe-delimited record line, nine fields:
/// date-time | level | thread id | thread name | source file | member | line | message | exception
fn format_record(entry: &LogEntry) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}|{}|{}|{}\n",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.level.as_str(),
        entry.thread_id,
        entry.thread_name,
        entry.source_file_path,
        entry.member_name,
        entry.source_line_number,
        sanitize_field(&entry.message),
        entry
            .exception
            .as_deref()
            .map(sanitize_field)
            .unwrap_or_default(),
    )
}
