// Integration test for best-effort directory cleanup

use nxsetup::cleanup::{delete_files_in_directory, CleanupStatus};
use nxsetup::host::MemoryHost;
use nxsetup::logs::{Logger, LoggerConfig};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_removes_exactly_the_files() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    for i in 0..5 {
        fs::write(dir.join(format!("file-{}.txt", i)), "x").unwrap();
    }
    for i in 0..3 {
        let sub = dir.join(format!("sub-{}", i));
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.txt"), "y").unwrap();
    }

    let report = delete_files_in_directory(dir, None);

    assert_eq!(report.status(), CleanupStatus::Clean);
    assert_eq!(report.removed.len(), 5);

    let remaining: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(remaining.len(), 3);
    assert!(remaining.iter().all(|p| p.is_dir()));
    for i in 0..3 {
        assert!(dir.join(format!("sub-{}", i)).join("inner.txt").exists());
    }
}

#[test]
fn test_missing_directory_logs_and_returns() {
    let temp_dir = TempDir::new().unwrap();
    let logger = Logger::open(
        &LoggerConfig::new("cleanup").in_directory(temp_dir.path()),
        Arc::new(MemoryHost::new()),
    )
    .unwrap();

    let report = delete_files_in_directory(&temp_dir.path().join("gone"), Some(&logger));

    assert_eq!(report.status(), CleanupStatus::Partial);
    assert!(report.removed.is_empty());

    let content = fs::read_to_string(logger.log_file_path()).unwrap();
    assert!(content.contains("[Error] Error deleting files:"));
}

#[cfg(unix)]
#[test]
fn test_symlink_to_directory_is_removed_not_followed() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target");
    let dir = temp_dir.path().join("dir");
    fs::create_dir(&target).unwrap();
    fs::create_dir(&dir).unwrap();
    fs::write(target.join("precious.txt"), "p").unwrap();
    std::os::unix::fs::symlink(&target, dir.join("link")).unwrap();

    let report = delete_files_in_directory(&dir, None);

    assert!(report.is_clean());
    assert!(!dir.join("link").exists());
    assert!(target.join("precious.txt").exists());
}
