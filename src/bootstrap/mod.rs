// Bootstrap module - One-time tool setup run when the plugin loads

use crate::cleanup::{delete_files_in_directory, CleanupReport};
use crate::config::ToolConfig;
use crate::error::{NxSetupError, Result};
use crate::host::MessageKind;
use crate::logs::{Logger, LoggerRegistry};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Directories the tool reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// Project root the other two hang off
    pub base: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ToolPaths {
    /// Resolve the tool directories relative to the plugin install directory.
    ///
    /// The plugin binary is expected `config.base_levels_up` levels below a
    /// project root holding the input and output directories. Relative
    /// install directories are taken from the current directory, and `..`
    /// components are folded before walking up.
    pub fn resolve(install_dir: &Path, config: &ToolConfig) -> Result<Self> {
        let full = full_path(install_dir)?;
        let base = full
            .ancestors()
            .nth(config.base_levels_up)
            .ok_or_else(|| {
                NxSetupError::PathResolution(format!(
                    "{} has fewer than {} parent directories",
                    install_dir.display(),
                    config.base_levels_up
                ))
            })?
            .to_path_buf();

        Ok(Self {
            input: base.join(&config.input_dir_name),
            output: base.join(&config.output_dir_name),
            base,
        })
    }
}

/// Absolute form of `path` with `.` and `..` folded away
fn full_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|e| {
        NxSetupError::PathResolution(format!(
            "Cannot resolve install directory {:?}: {}",
            path, e
        ))
    })?;

    let mut full = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                full.pop();
            }
            other => full.push(other),
        }
    }
    Ok(full)
}

/// Everything bootstrap set up, handed to the tool logic
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub paths: ToolPaths,
    /// Present when a pre-existing output directory was cleaned
    pub cleanup: Option<CleanupReport>,
    pub logger: Arc<Logger>,
}

/// Resolve paths, prepare the output directory and start logging into it.
///
/// Any failure here is a setup failure and is returned to the caller.
pub fn initialize_tool(
    registry: &LoggerRegistry,
    install_dir: &Path,
    config: &ToolConfig,
) -> Result<ToolContext> {
    let paths = ToolPaths::resolve(install_dir, config)?;
    tracing::debug!(
        input = %paths.input.display(),
        output = %paths.output.display(),
        "resolved tool paths"
    );

    if config.show_path_messages {
        let host = registry.host();
        host.show_message(
            "Input Directory",
            MessageKind::Information,
            &format!("Input Directory: {}", paths.input.display()),
        );
        host.show_message(
            "Output Directory",
            MessageKind::Information,
            &format!("Output Directory: {}", paths.output.display()),
        );
    }

    let cleanup = prepare_output_directory(&paths.output, registry)?;

    let logger = registry.init(config.logger_config(&paths.output))?;
    logger.info(&format!(
        "Tool initialized with input directory: {}",
        paths.input.display()
    ))?;
    logger.info(&format!("Output directory set to: {}", paths.output.display()))?;

    if let Some(report) = cleanup.as_ref().filter(|r| !r.is_clean()) {
        logger.warning(&format!(
            "Output directory cleanup skipped {} entries",
            report.skipped.len()
        ))?;
    }

    Ok(ToolContext {
        paths,
        cleanup,
        logger,
    })
}

/// Create the output directory, or empty it if it already exists
fn prepare_output_directory(
    output: &Path,
    registry: &LoggerRegistry,
) -> Result<Option<CleanupReport>> {
    if !output.exists() {
        std::fs::create_dir_all(output).map_err(|e| {
            NxSetupError::DirectoryError(format!(
                "Failed to create output directory {}: {}",
                output.display(),
                e
            ))
        })?;
        return Ok(None);
    }

    if !output.is_dir() {
        return Err(NxSetupError::DirectoryError(format!(
            "Output path is not a directory: {}",
            output.display()
        )));
    }

    let logger = registry.current();
    let report = delete_files_in_directory(output, logger.as_deref());
    tracing::info!(
        "Cleaned {}: {} removed, {} skipped",
        output.display(),
        report.removed.len(),
        report.skipped.len()
    );
    Ok(Some(report))
}
