use super::logger::{Logger, LoggerConfig};
use crate::error::Result;
use crate::host::Host;
use std::sync::{Arc, Mutex, MutexGuard};

/// Owner of the single live [`Logger`].
///
/// One registry is created at startup and handed to every component that
/// logs. All construction, re-initialization and disposal goes through its
/// mutex, so at most one logger is live at a time and concurrent first use
/// builds exactly one instance.
pub struct LoggerRegistry {
    host: Arc<dyn Host>,
    defaults: LoggerConfig,
    current: Mutex<Option<Arc<Logger>>>,
}

impl LoggerRegistry {
    /// Registry whose lazily-built logger uses [`LoggerConfig::default`]
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self::with_defaults(host, LoggerConfig::default())
    }

    /// Registry with custom settings for the lazily-built logger
    pub fn with_defaults(host: Arc<dyn Host>, defaults: LoggerConfig) -> Self {
        Self {
            host,
            defaults,
            current: Mutex::new(None),
        }
    }

    /// Return the live logger, building one from the defaults if needed.
    ///
    /// A logger disposed through its own handle counts as absent.
    pub fn get_instance(&self) -> Result<Arc<Logger>> {
        let mut current = self.lock_current();
        if let Some(logger) = current.as_ref().filter(|l| !l.is_disposed()) {
            return Ok(Arc::clone(logger));
        }

        let logger = Arc::new(Logger::open(&self.defaults, Arc::clone(&self.host))?);
        *current = Some(Arc::clone(&logger));
        Ok(logger)
    }

    /// Replace the live logger with one built from `config`.
    ///
    /// The previous logger is disposed before the new file is opened.
    pub fn init(&self, config: LoggerConfig) -> Result<Arc<Logger>> {
        let mut current = self.lock_current();
        if let Some(previous) = current.take() {
            if let Err(e) = previous.dispose() {
                tracing::warn!(
                    "Failed to dispose previous log {}: {}",
                    previous.log_file_path().display(),
                    e
                );
            }
        }

        let logger = Arc::new(Logger::open(&config, Arc::clone(&self.host))?);
        *current = Some(Arc::clone(&logger));
        Ok(logger)
    }

    /// The live logger, if any, without building one
    pub fn current(&self) -> Option<Arc<Logger>> {
        self.lock_current()
            .as_ref()
            .filter(|l| !l.is_disposed())
            .cloned()
    }

    /// Dispose and release the live logger; no-op when none is live
    pub fn dispose(&self) -> Result<()> {
        match self.lock_current().take() {
            Some(logger) => logger.dispose(),
            None => Ok(()),
        }
    }

    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<Arc<Logger>>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for LoggerRegistry {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            tracing::warn!("Failed to dispose logger on shutdown: {}", e);
        }
    }
}
