// Integration test for the logger registry and line formatting

use nxsetup::host::MemoryHost;
use nxsetup::logs::{LoggerConfig, LoggerRegistry};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// `[YYYY-MM-DD HH:MM:SS] [Level] message`
fn is_formatted(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() < 24 || bytes[0] != b'[' || &line[20..22] != "] " {
        return false;
    }
    let digits = [1, 2, 3, 4, 6, 7, 9, 10, 12, 13, 15, 16, 18, 19];
    if !digits.iter().all(|&i| bytes[i].is_ascii_digit()) {
        return false;
    }
    let rest = &line[22..];
    ["[Info] ", "[Warning] ", "[Error] ", "[Debug] "]
        .iter()
        .any(|prefix| rest.starts_with(prefix))
}

#[test]
fn test_every_logged_line_is_formatted() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LoggerRegistry::new(Arc::new(MemoryHost::new()));
    let logger = registry
        .init(LoggerConfig::new("format").in_directory(temp_dir.path()))
        .unwrap();

    logger.info("info").unwrap();
    logger.warning("warning").unwrap();
    logger.error("error").unwrap();
    logger.debug("debug").unwrap();
    logger.write_section("Section").unwrap();
    registry.dispose().unwrap();

    let lines = read_lines(logger.log_file_path());
    assert_eq!(lines.len(), 9);
    for line in &lines {
        assert!(is_formatted(line), "unexpected line: {}", line);
    }
}

#[test]
fn test_reinit_closes_old_file_and_uses_new_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LoggerRegistry::new(Arc::new(MemoryHost::new()));
    let config = LoggerConfig::new("NXLog").in_directory(temp_dir.path());

    let first = registry.init(config.clone()).unwrap();
    std::thread::sleep(Duration::from_millis(1100));
    let second = registry.init(config).unwrap();

    assert!(first.is_disposed());
    assert_ne!(first.log_file_path(), second.log_file_path());

    let first_lines = read_lines(first.log_file_path());
    assert!(first_lines
        .last()
        .unwrap()
        .ends_with("===== NX Logging Ended ====="));

    second.info("only in the second file").unwrap();
    let first_after = read_lines(first.log_file_path());
    assert_eq!(first_lines, first_after);
    assert!(read_lines(second.log_file_path())
        .last()
        .unwrap()
        .ends_with("only in the second file"));
}

#[test]
fn test_singleton_identity_until_init() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LoggerRegistry::with_defaults(
        Arc::new(MemoryHost::new()),
        LoggerConfig::default().in_directory(temp_dir.path()),
    );

    let a = registry.get_instance().unwrap();
    let b = registry.get_instance().unwrap();
    assert_eq!(a.log_file_path(), b.log_file_path());
    assert!(Arc::ptr_eq(&a, &b));

    let c = registry
        .init(LoggerConfig::new("other").in_directory(temp_dir.path()))
        .unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert!(a.is_disposed());
}

#[test]
fn test_double_dispose_is_harmless() {
    let temp_dir = TempDir::new().unwrap();
    let registry = LoggerRegistry::new(Arc::new(MemoryHost::new()));
    let logger = registry
        .init(LoggerConfig::new("twice").in_directory(temp_dir.path()))
        .unwrap();

    logger.dispose().unwrap();
    logger.dispose().unwrap();
    registry.dispose().unwrap();
    registry.dispose().unwrap();

    let ended = read_lines(logger.log_file_path())
        .iter()
        .filter(|l| l.ends_with("NX Logging Ended ====="))
        .count();
    assert_eq!(ended, 1);
}

#[test]
fn test_write_important_block() {
    let temp_dir = TempDir::new().unwrap();
    let host = Arc::new(MemoryHost::new());
    let registry = LoggerRegistry::new(host.clone());
    let logger = registry
        .init(LoggerConfig::new("important").in_directory(temp_dir.path()))
        .unwrap();

    logger.write_important("msg").unwrap();

    let listing = host.listing_lines();
    let block = &listing[listing.len() - 3..];
    assert_eq!(block[0], "*".repeat(80));
    assert!(block[1].ends_with("[Warning] msg"));
    assert_eq!(block[0], block[2]);
}
