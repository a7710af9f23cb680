// Integration test for plugin load against a temporary project layout

use nxsetup::bootstrap::initialize_tool;
use nxsetup::config::ToolConfig;
use nxsetup::host::{MemoryHost, MessageKind};
use nxsetup::logs::LoggerRegistry;
use nxsetup::plugin::Plugin;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Create `<root>/Tool/Application/bin`, three levels below `root`
fn install_dir_in(root: &Path) -> PathBuf {
    let dir = root.join("Tool").join("Application").join("bin");
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_fresh_root_creates_output() {
    let temp_dir = TempDir::new().unwrap();
    let install_dir = install_dir_in(temp_dir.path());
    let output = temp_dir.path().join("Output");
    assert!(!output.exists());

    let host = Arc::new(MemoryHost::new().with_env("UGII_VERSION", "v2406"));
    let registry = Arc::new(LoggerRegistry::new(host.clone()));
    let plugin = Plugin::new(host.clone(), registry, &install_dir, ToolConfig::default());

    let context = plugin.load().expect("load should succeed");
    plugin.unload("");

    assert!(output.is_dir());
    assert_eq!(context.paths.input, temp_dir.path().join("Input"));
    assert_eq!(context.paths.output, output);

    let names = file_names(&output);
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("NXLog_"));
    assert!(names[0].ends_with(".txt"));

    let content = fs::read_to_string(context.logger.log_file_path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].ends_with("[Info] ===== NX Logging Started ====="));
    assert!(lines[1].ends_with("NX Version: v2406"));
    assert!(lines[2].contains("Tool initialized with input directory:"));
    assert!(lines[3].contains("Output directory set to:"));
    assert!(lines.last().unwrap().ends_with("===== NX Logging Ended ====="));

    // The listing window saw the same lines as the file
    assert_eq!(host.listing_lines(), lines);

    let info_boxes = host
        .messages()
        .into_iter()
        .filter(|m| m.kind == MessageKind::Information)
        .count();
    assert_eq!(info_boxes, 2);
}

#[test]
fn test_second_run_removes_stale_files() {
    let temp_dir = TempDir::new().unwrap();
    let install_dir = install_dir_in(temp_dir.path());
    let output = temp_dir.path().join("Output");
    let host = Arc::new(MemoryHost::new());
    let config = ToolConfig {
        log_base_name: "Run".to_string(),
        ..ToolConfig::default()
    };

    // First run leaves its log behind
    {
        let registry = LoggerRegistry::new(host.clone());
        initialize_tool(&registry, &install_dir, &config).unwrap();
        registry.dispose().unwrap();
    }
    fs::write(output.join("result.csv"), "stale").unwrap();
    fs::write(output.join("part.prt"), "stale").unwrap();
    assert_eq!(file_names(&output).len(), 3);

    // Make sure the second log gets a different timestamp
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let registry = LoggerRegistry::new(host.clone());
    let context = initialize_tool(&registry, &install_dir, &config).unwrap();

    let report = context.cleanup.as_ref().unwrap();
    assert!(report.is_clean());
    assert_eq!(report.removed.len(), 3);

    let names = file_names(&output);
    assert_eq!(names.len(), 1);
    assert_eq!(
        output.join(&names[0]),
        context.logger.log_file_path().to_path_buf()
    );
}

#[test]
fn test_subdirectories_survive_bootstrap() {
    let temp_dir = TempDir::new().unwrap();
    let install_dir = install_dir_in(temp_dir.path());
    let output = temp_dir.path().join("Output");
    fs::create_dir_all(output.join("reports")).unwrap();
    fs::write(output.join("reports").join("keep.txt"), "keep").unwrap();

    let registry = LoggerRegistry::new(Arc::new(MemoryHost::new()));
    initialize_tool(&registry, &install_dir, &ToolConfig::default()).unwrap();

    assert!(output.join("reports").join("keep.txt").exists());
}

#[test]
fn test_load_failure_disposes_logger() {
    let temp_dir = TempDir::new().unwrap();
    let install_dir = install_dir_in(temp_dir.path());
    // A file where the output directory should be
    fs::write(temp_dir.path().join("Output"), "not a dir").unwrap();

    let host = Arc::new(MemoryHost::new());
    let registry = Arc::new(LoggerRegistry::with_defaults(
        host.clone(),
        nxsetup::logs::LoggerConfig::default().in_directory(temp_dir.path()),
    ));
    let earlier = registry.get_instance().unwrap();

    let plugin = Plugin::new(host.clone(), Arc::clone(&registry), install_dir, ToolConfig::default());
    assert!(plugin.load().is_none());

    assert!(earlier.is_disposed());
    assert!(registry.current().is_none());
    assert!(host.messages().is_empty());
}
