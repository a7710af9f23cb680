// Logs module - Plugin log file and listing window output

mod level;
mod logger;
mod registry;
mod writer;

pub use level::LogLevel;
pub use logger::{
    Logger, LoggerConfig, DEFAULT_LOG_BASE_NAME, DEFAULT_SEPARATOR_CHAR,
    DEFAULT_SEPARATOR_LENGTH, DEFAULT_VERSION_VARIABLE,
};
pub use registry::LoggerRegistry;
pub use writer::{format_log_line, log_file_name, LogWriter};
