use super::{Host, MessageKind};
use crate::error::{NxSetupError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// A message box recorded by [`MemoryHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    pub title: String,
    pub kind: MessageKind,
    pub text: String,
}

#[derive(Debug, Default)]
struct MemoryHostState {
    messages: Vec<RecordedMessage>,
    listing: Vec<String>,
    listing_opens: usize,
    listing_open: bool,
    listing_closed_by_host: bool,
}

/// In-memory host that records everything the plugin sends to it.
///
/// Useful for tests: message boxes and listing lines can be inspected after
/// the fact, environment values are whatever the test configured.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<MemoryHostState>,
    env: HashMap<String, String>,
    fail_listing: bool,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a host environment variable
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Make `open_listing` fail, for exercising setup error paths
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Simulate the user closing the listing window: later writes fail
    pub fn close_listing(&self) {
        self.lock().listing_closed_by_host = true;
    }

    pub fn messages(&self) -> Vec<RecordedMessage> {
        self.lock().messages.clone()
    }

    pub fn listing_lines(&self) -> Vec<String> {
        self.lock().listing.clone()
    }

    /// Number of times the listing window was opened
    pub fn listing_opens(&self) -> usize {
        self.lock().listing_opens
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryHostState> {
        // A poisoned lock only means a test panicked mid-write; keep recording.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Host for MemoryHost {
    fn show_message(&self, title: &str, kind: MessageKind, text: &str) {
        self.lock().messages.push(RecordedMessage {
            title: title.to_string(),
            kind,
            text: text.to_string(),
        });
    }

    fn open_listing(&self) -> Result<()> {
        if self.fail_listing {
            return Err(NxSetupError::HostError(
                "Listing window is not available".to_string(),
            ));
        }
        let mut state = self.lock();
        state.listing_opens += 1;
        state.listing_open = true;
        Ok(())
    }

    fn write_listing_line(&self, text: &str) -> Result<()> {
        let mut state = self.lock();
        if state.listing_closed_by_host {
            return Err(NxSetupError::HostError(
                "Listing window was closed".to_string(),
            ));
        }
        if state.listing_open {
            state.listing.push(text.to_string());
        }
        Ok(())
    }

    fn environment_value(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
}
