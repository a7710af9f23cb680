// Plugin module - Load and unload hooks invoked by the host application

use crate::bootstrap::{initialize_tool, ToolContext};
use crate::config::ToolConfig;
use crate::host::{Host, MessageKind};
use crate::logs::LoggerRegistry;
use std::path::PathBuf;
use std::sync::Arc;

/// When the host should unload the plugin library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadOption {
    /// Only when the user asks for it
    Explicitly = 0,
    /// Right after the entry point returns
    Immediately = 1,
    /// When the host session ends
    AtTermination = 2,
}

impl UnloadOption {
    /// Numeric value passed back to the host
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// The plugin as seen by the host: load, unload policy, unload.
pub struct Plugin {
    host: Arc<dyn Host>,
    registry: Arc<LoggerRegistry>,
    install_dir: PathBuf,
    config: ToolConfig,
}

impl Plugin {
    pub fn new(
        host: Arc<dyn Host>,
        registry: Arc<LoggerRegistry>,
        install_dir: impl Into<PathBuf>,
        config: ToolConfig,
    ) -> Self {
        Self {
            host,
            registry,
            install_dir: install_dir.into(),
            config,
        }
    }

    /// Run the tool setup.
    ///
    /// A setup failure disposes the logger and is not passed on to the host;
    /// it only shows up in the diagnostic trace and as `None` here.
    pub fn load(&self) -> Option<ToolContext> {
        match initialize_tool(&self.registry, &self.install_dir, &self.config) {
            Ok(context) => Some(context),
            Err(e) => {
                tracing::error!("Tool setup failed: {}", e);
                if let Err(dispose_err) = self.registry.dispose() {
                    tracing::warn!("Failed to dispose logger after setup failure: {}", dispose_err);
                }
                None
            }
        }
    }

    /// The plugin holds no state between invocations
    pub fn unload_option(&self) -> UnloadOption {
        UnloadOption::Immediately
    }

    /// Release the logger before the host unloads the library
    pub fn unload(&self, arg: &str) {
        self.unload_with(arg, || Ok(()));
    }

    /// Run `hook`, then release the logger whether or not the hook failed.
    ///
    /// Errors are shown to the user in a host error dialog titled `Main`.
    pub fn unload_with<F>(&self, arg: &str, hook: F)
    where
        F: FnOnce() -> anyhow::Result<()>,
    {
        tracing::debug!(arg, "unloading plugin");

        let hook_result = hook();
        let dispose_result = self.registry.dispose().map_err(anyhow::Error::from);

        for err in [hook_result.err(), dispose_result.err()].into_iter().flatten() {
            self.host
                .show_message("Main", MessageKind::Error, &format!("{:#}", err));
        }
    }

    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }
}
