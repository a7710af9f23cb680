use super::LogLevel;
use crate::error::{NxSetupError, Result};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Timestamp format used inside log lines
const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format used in log file names
const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Build the log file name `<base>_<YYYYMMDD_HHMMSS>.txt`
pub fn log_file_name(base_name: &str, timestamp: &DateTime<Local>) -> String {
    format!("{}_{}.txt", base_name, timestamp.format(FILE_TIMESTAMP_FORMAT))
}

/// Format a log line as `[YYYY-MM-DD HH:MM:SS] [Level] message`
pub fn format_log_line(timestamp: &DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        timestamp.format(LINE_TIMESTAMP_FORMAT),
        level,
        message
    )
}

/// LogWriter owns the file sink of a logger.
///
/// The file is truncated on creation and every line is flushed as soon as it
/// is written. Once closed, writes are rejected by the caller checking
/// [`LogWriter::is_open`].
pub struct LogWriter {
    /// Path to the log file
    path: PathBuf,
    /// Buffered file handle, `None` once closed
    file: Option<BufWriter<File>>,
    /// Number of lines written so far
    lines_written: u64,
}

impl LogWriter {
    /// Create (or truncate) the log file at `path`
    ///
    /// # Returns
    /// * `Ok(LogWriter)` - File opened for writing
    /// * `Err(NxSetupError)` - The file could not be created
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| {
                NxSetupError::LogFileError(format!("{}: {}", path.display(), e))
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Some(BufWriter::new(file)),
            lines_written: 0,
        })
    }

    /// Write one line and flush it to the file
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        writeln!(file, "{}", line)
            .map_err(|e| NxSetupError::LogError(format!("Failed to write to log: {}", e)))?;
        file.flush()
            .map_err(|e| NxSetupError::LogError(format!("Failed to flush log: {}", e)))?;

        self.lines_written += 1;
        Ok(())
    }

    /// Flush buffered data and sync it to disk
    pub fn flush(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()
                .map_err(|e| NxSetupError::LogError(format!("Failed to flush log: {}", e)))?;
            file.get_ref()
                .sync_data()
                .map_err(|e| NxSetupError::LogError(format!("Failed to sync log: {}", e)))?;
        }
        Ok(())
    }

    /// Flush and close the file. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let result = self.flush();
        self.file = None;
        result
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}
