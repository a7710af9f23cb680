// Cleanup module - Best-effort removal of stale files from a directory

use crate::logs::Logger;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An entry that could not be removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Whether a cleanup removed everything it was asked to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStatus {
    Clean,
    Partial,
}

/// Outcome of [`delete_files_in_directory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub directory: PathBuf,
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
}

impl CleanupReport {
    fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            removed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn status(&self) -> CleanupStatus {
        if self.skipped.is_empty() {
            CleanupStatus::Clean
        } else {
            CleanupStatus::Partial
        }
    }

    pub fn is_clean(&self) -> bool {
        self.status() == CleanupStatus::Clean
    }
}

/// Delete every non-directory entry directly inside `directory`.
///
/// Subdirectories and their contents are left alone. Nothing escapes this
/// call: a failure to list the directory ends the cleanup with a single
/// skipped entry for the directory itself, a failure to delete one file is
/// recorded and the remaining files are still removed. Every failure is
/// reported to `logger` when one is given.
pub fn delete_files_in_directory(directory: &Path, logger: Option<&Logger>) -> CleanupReport {
    clean_with(directory, logger, |path| fs::remove_file(path))
}

fn clean_with<F>(directory: &Path, logger: Option<&Logger>, mut remove: F) -> CleanupReport
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut report = CleanupReport::new(directory);

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            record_failure(&mut report, logger, directory, &e);
            return report;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                record_failure(&mut report, logger, directory, &e);
                continue;
            }
        };

        let path = entry.path();
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => {
                tracing::trace!("Keeping subdirectory {}", path.display());
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                record_failure(&mut report, logger, &path, &e);
                continue;
            }
        }

        match remove(&path) {
            Ok(()) => {
                tracing::debug!("Deleted {}", path.display());
                report.removed.push(path);
            }
            Err(e) => record_failure(&mut report, logger, &path, &e),
        }
    }

    report
}

fn record_failure(report: &mut CleanupReport, logger: Option<&Logger>, path: &Path, err: &io::Error) {
    tracing::warn!("Could not clean {}: {}", path.display(), err);

    if let Some(logger) = logger {
        let message = format!("Error deleting files: {} ({})", err, path.display());
        if let Err(log_err) = logger.error(&message) {
            tracing::warn!("Failed to log cleanup error: {}", log_err);
        }
    }

    report.skipped.push(SkippedEntry {
        path: path.to_path_buf(),
        reason: err.to_string(),
    });
}
