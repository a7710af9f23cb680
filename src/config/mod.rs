use crate::error::{NxSetupError, Result};
use crate::logs::{LoggerConfig, DEFAULT_LOG_BASE_NAME, DEFAULT_VERSION_VARIABLE};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// Upper bound for `base_levels_up`
const MAX_BASE_LEVELS_UP: usize = 16;

/// Tool configuration: directory layout and logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Base name of the log file
    #[serde(default = "default_log_base_name")]
    pub log_base_name: String,

    /// Write the log to a file in the output directory
    #[serde(default = "default_true")]
    pub log_to_file: bool,

    /// Mirror the log to the host listing window
    #[serde(default = "default_true")]
    pub log_to_listing: bool,

    /// Name of the input directory under the base directory
    #[serde(default = "default_input_dir_name")]
    pub input_dir_name: String,

    /// Name of the output directory under the base directory
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// How many levels above the install directory the base directory sits
    #[serde(default = "default_base_levels_up")]
    pub base_levels_up: usize,

    /// Show the resolved paths in host message boxes
    #[serde(default = "default_true")]
    pub show_path_messages: bool,

    /// Host variable holding the application version
    #[serde(default = "default_version_variable")]
    pub version_variable: String,
}

// Default value functions for serde
fn default_log_base_name() -> String {
    DEFAULT_LOG_BASE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_input_dir_name() -> String {
    "Input".to_string()
}

fn default_output_dir_name() -> String {
    "Output".to_string()
}

fn default_base_levels_up() -> usize {
    3
}

fn default_version_variable() -> String {
    DEFAULT_VERSION_VARIABLE.to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_base_name: default_log_base_name(),
            log_to_file: true,
            log_to_listing: true,
            input_dir_name: default_input_dir_name(),
            output_dir_name: default_output_dir_name(),
            base_levels_up: default_base_levels_up(),
            show_path_messages: true,
            version_variable: default_version_variable(),
        }
    }
}

impl ToolConfig {
    /// Load the configuration from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<ToolConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| NxSetupError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let config = match extension {
            "toml" => Self::parse_toml(&contents)?,
            "json" => Self::parse_json(&contents)?,
            _ => {
                return Err(NxSetupError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<ToolConfig> {
        toml::from_str(contents)
            .map_err(|e| NxSetupError::InvalidConfig(format!("Failed to parse TOML: {}", e)))
    }

    fn parse_json(contents: &str) -> Result<ToolConfig> {
        serde_json::from_str(contents)
            .map_err(|e| NxSetupError::InvalidConfig(format!("Failed to parse JSON: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_name("log_base_name", &self.log_base_name)?;
        validate_name("input_dir_name", &self.input_dir_name)?;
        validate_name("output_dir_name", &self.output_dir_name)?;

        if self.version_variable.trim().is_empty() {
            return Err(NxSetupError::MissingConfigField(
                "version_variable".to_string(),
            ));
        }

        if self.base_levels_up == 0 || self.base_levels_up > MAX_BASE_LEVELS_UP {
            return Err(NxSetupError::ConfigValidationError(format!(
                "base_levels_up must be between 1 and {}",
                MAX_BASE_LEVELS_UP
            )));
        }

        if self.input_dir_name == self.output_dir_name {
            return Err(NxSetupError::ConfigValidationError(
                "input_dir_name and output_dir_name must differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Logger settings for a log written into `directory`
    pub fn logger_config(&self, directory: &Path) -> LoggerConfig {
        LoggerConfig {
            base_name: self.log_base_name.clone(),
            directory: Some(directory.to_path_buf()),
            log_to_file: self.log_to_file,
            log_to_listing: self.log_to_listing,
            version_variable: self.version_variable.clone(),
        }
    }
}

/// A name must be exactly one normal path component
fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NxSetupError::MissingConfigField(field.to_string()));
    }

    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(NxSetupError::ConfigValidationError(format!(
            "{} must be a single directory or file name, got '{}'",
            field, value
        ))),
    }
}
