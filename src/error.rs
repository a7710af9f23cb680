use thiserror::Error;

/// Main error type for the plugin setup layer
#[derive(Debug, Error)]
pub enum NxSetupError {
    // Log-related errors
    #[error("Log error: {0}")]
    LogError(String),

    #[error("Failed to open log file: {0}")]
    LogFileError(String),

    // Filesystem layout errors
    #[error("Directory error: {0}")]
    DirectoryError(String),

    #[error("Failed to resolve tool paths: {0}")]
    PathResolution(String),

    // Host errors
    #[error("Host error: {0}")]
    HostError(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Missing required configuration field: {0}")]
    MissingConfigField(String),

    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // IO errors (automatically converted from std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for setup operations
pub type Result<T> = std::result::Result<T, NxSetupError>;
