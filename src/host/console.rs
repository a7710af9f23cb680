use super::{Host, MessageKind};
use crate::error::Result;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Host that renders message boxes and the listing window on the terminal.
///
/// Used by the `nxsetup` binary when no CAD application is present.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    listing_open: AtomicBool,
    quiet_messages: bool,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress message boxes (listing output is still printed)
    pub fn with_quiet_messages(mut self, quiet: bool) -> Self {
        self.quiet_messages = quiet;
        self
    }

    pub fn is_listing_open(&self) -> bool {
        self.listing_open.load(Ordering::SeqCst)
    }
}

impl Host for ConsoleHost {
    fn show_message(&self, title: &str, kind: MessageKind, text: &str) {
        if self.quiet_messages {
            return;
        }

        let header = match kind {
            MessageKind::Information => format!("ℹ {}", title).blue().bold(),
            MessageKind::Warning => format!("⚠ {}", title).yellow().bold(),
            MessageKind::Error => format!("✗ {}", title).red().bold(),
        };

        match kind {
            MessageKind::Error => eprintln!("{}\n  {}", header, text),
            _ => println!("{}\n  {}", header, text),
        }
    }

    fn open_listing(&self) -> Result<()> {
        if !self.listing_open.swap(true, Ordering::SeqCst) {
            println!("{}", "── Listing Window ──".dimmed());
        }
        Ok(())
    }

    fn write_listing_line(&self, text: &str) -> Result<()> {
        if self.is_listing_open() {
            println!("{}", text);
        }
        Ok(())
    }

    fn environment_value(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
