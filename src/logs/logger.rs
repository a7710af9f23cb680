use super::writer::{format_log_line, log_file_name, LogWriter};
use super::LogLevel;
use crate::error::{NxSetupError, Result};
use crate::host::Host;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Default base name for log files
pub const DEFAULT_LOG_BASE_NAME: &str = "NXLog";

/// Host variable holding the application version string
pub const DEFAULT_VERSION_VARIABLE: &str = "UGII_VERSION";

pub const DEFAULT_SEPARATOR_CHAR: char = '=';
pub const DEFAULT_SEPARATOR_LENGTH: usize = 80;

const START_BANNER: &str = "===== NX Logging Started =====";
const END_BANNER: &str = "===== NX Logging Ended =====";

/// Settings used to build a [`Logger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// File name prefix, the timestamp and `.txt` are appended
    pub base_name: String,
    /// Directory for the log file; the system temp dir when `None`
    pub directory: Option<PathBuf>,
    pub log_to_file: bool,
    pub log_to_listing: bool,
    /// Host variable queried for the version shown in the start lines
    pub version_variable: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            base_name: DEFAULT_LOG_BASE_NAME.to_string(),
            directory: None,
            log_to_file: true,
            log_to_listing: true,
            version_variable: DEFAULT_VERSION_VARIABLE.to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ..Self::default()
        }
    }

    pub fn in_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_file(mut self, enabled: bool) -> Self {
        self.log_to_file = enabled;
        self
    }

    pub fn with_listing(mut self, enabled: bool) -> Self {
        self.log_to_listing = enabled;
        self
    }

    /// Directory the log file goes into
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(std::env::temp_dir)
    }
}

struct LoggerState {
    file: Option<LogWriter>,
    listing_open: bool,
    disposed: bool,
}

/// Writes timestamped lines to a log file and to the host listing window.
///
/// A logger is shared as `Arc<Logger>`; the sinks sit behind a mutex so lines
/// from different threads never interleave. After [`Logger::dispose`] every
/// write is silently skipped.
pub struct Logger {
    path: PathBuf,
    log_to_file: bool,
    log_to_listing: bool,
    host: Arc<dyn Host>,
    state: Mutex<LoggerState>,
}

impl Logger {
    /// Open the sinks described by `config` and write the start lines.
    ///
    /// Directory creation, file creation and listing failures are returned
    /// to the caller.
    pub fn open(config: &LoggerConfig, host: Arc<dyn Host>) -> Result<Self> {
        let directory = config.resolved_directory();
        let path = directory.join(log_file_name(&config.base_name, &Local::now()));

        let file = if config.log_to_file {
            std::fs::create_dir_all(&directory).map_err(|e| {
                NxSetupError::LogError(format!(
                    "Failed to create log directory {}: {}",
                    directory.display(),
                    e
                ))
            })?;
            Some(LogWriter::create(&path)?)
        } else {
            None
        };

        if config.log_to_listing {
            host.open_listing()?;
        }

        tracing::debug!(
            path = %path.display(),
            file = config.log_to_file,
            listing = config.log_to_listing,
            "logger opened"
        );

        let logger = Self {
            path,
            log_to_file: config.log_to_file,
            log_to_listing: config.log_to_listing,
            host,
            state: Mutex::new(LoggerState {
                file,
                listing_open: config.log_to_listing,
                disposed: false,
            }),
        };

        logger.info(START_BANNER)?;
        logger.log_environment_info(&config.version_variable)?;

        Ok(logger)
    }

    /// Write `[timestamp] [level] message` to every open sink
    pub fn log(&self, level: LogLevel, message: &str) -> Result<()> {
        let line = format_log_line(&Local::now(), level, message);
        let mut state = self.lock_state();
        self.emit(&mut state, &line)
    }

    pub fn info(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    pub fn warning(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Warning, message)
    }

    pub fn error(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    /// Log an error and its cause chain.
    ///
    /// Writes the message at Error level, then the chain of sources at Debug
    /// level.
    pub fn log_exception(&self, err: &(dyn std::error::Error + 'static)) -> Result<()> {
        self.error(&format!("Exception: {}", err))?;
        self.debug(&format!("Stack Trace: {}", error_chain(err)))
    }

    /// Write a bare line of `length` copies of `character`
    pub fn write_separator(&self, character: char, length: usize) -> Result<()> {
        let line: String = std::iter::repeat(character).take(length).collect();
        let mut state = self.lock_state();
        self.emit(&mut state, &line)
    }

    /// Write a line of 80 `=` characters
    pub fn write_default_separator(&self) -> Result<()> {
        self.write_separator(DEFAULT_SEPARATOR_CHAR, DEFAULT_SEPARATOR_LENGTH)
    }

    /// Write `title` followed by a `-` underline of the same width
    pub fn write_section(&self, title: &str) -> Result<()> {
        self.write_section_with(title, '-')
    }

    pub fn write_section_with(&self, title: &str, underline: char) -> Result<()> {
        let rule: String = std::iter::repeat(underline)
            .take(title.chars().count())
            .collect();
        self.info(title)?;
        self.info(&rule)
    }

    /// Surround a Warning-level message with `*` separators
    pub fn write_important(&self, message: &str) -> Result<()> {
        self.write_separator('*', DEFAULT_SEPARATOR_LENGTH)?;
        self.warning(message)?;
        self.write_separator('*', DEFAULT_SEPARATOR_LENGTH)
    }

    /// Path of the log file, even when the file sink is disabled
    pub fn log_file_path(&self) -> &Path {
        &self.path
    }

    pub fn logs_to_file(&self) -> bool {
        self.log_to_file
    }

    pub fn logs_to_listing(&self) -> bool {
        self.log_to_listing
    }

    pub fn is_disposed(&self) -> bool {
        self.lock_state().disposed
    }

    /// Flush the file sink to disk; no-op without one
    pub fn flush(&self) -> Result<()> {
        match self.lock_state().file.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Write the end banner and close both sinks.
    ///
    /// Calling this more than once does nothing after the first call.
    pub fn dispose(&self) -> Result<()> {
        let mut state = self.lock_state();
        if state.disposed {
            return Ok(());
        }

        let line = format_log_line(&Local::now(), LogLevel::Info, END_BANNER);
        let banner = self.emit(&mut state, &line);

        let closed = match state.file.take() {
            Some(mut writer) => {
                let result = writer.close();
                tracing::debug!(
                    path = %writer.path().display(),
                    lines = writer.lines_written(),
                    "log file closed"
                );
                result
            }
            None => Ok(()),
        };
        state.listing_open = false;
        state.disposed = true;

        tracing::debug!(path = %self.path.display(), "logger disposed");
        banner.and(closed)
    }

    fn log_environment_info(&self, version_variable: &str) -> Result<()> {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string());
        let version = self
            .host
            .environment_value(version_variable)
            .unwrap_or_else(|| "unknown".to_string());

        self.debug(&format!("User: {}, NX Version: {}", user, version))
    }

    fn emit(&self, state: &mut LoggerState, line: &str) -> Result<()> {
        if self.log_to_file {
            if let Some(writer) = state.file.as_mut() {
                writer.write_line(line)?;
            }
        }

        if self.log_to_listing && state.listing_open {
            self.host.write_listing_line(line)?;
        }

        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, LoggerState> {
        // The state stays consistent across a panic in a writer, so recover it.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            tracing::warn!("Failed to close log {}: {}", self.path.display(), e);
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("log_to_file", &self.log_to_file)
            .field("log_to_listing", &self.log_to_listing)
            .finish()
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(" -> ")
}
