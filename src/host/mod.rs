// Host module - Capabilities the CAD application exposes to the plugin

mod console;
mod memory;

pub use console::ConsoleHost;
pub use memory::{MemoryHost, RecordedMessage};

use crate::error::Result;
use std::fmt;

/// Kind of modal message box shown by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Information,
    Warning,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Information => write!(f, "Information"),
            MessageKind::Warning => write!(f, "Warning"),
            MessageKind::Error => write!(f, "Error"),
        }
    }
}

/// Narrow view of the host application's session and UI services.
///
/// The plugin never talks to the CAD runtime directly; everything it needs
/// goes through this trait so setup can run against a console or an
/// in-memory host.
pub trait Host: Send + Sync {
    /// Show a blocking message box
    fn show_message(&self, title: &str, kind: MessageKind, text: &str);

    /// Open (or attach to) the listing window
    fn open_listing(&self) -> Result<()>;

    /// Append one line to the listing window
    fn write_listing_line(&self, text: &str) -> Result<()>;

    /// Look up a host environment variable
    fn environment_value(&self, name: &str) -> Option<String>;
}
