// CLI module - Stands in for the host application when run from a terminal

mod output;

use crate::bootstrap::ToolPaths;
use crate::cleanup::delete_files_in_directory;
use crate::config::ToolConfig;
use crate::error::{NxSetupError, Result};
use crate::host::{ConsoleHost, Host};
use crate::logs::LoggerRegistry;
use crate::plugin::Plugin;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// nxsetup - load the tool setup outside the CAD application
#[derive(Parser)]
#[command(name = "nxsetup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the plugin, then unload it
    Run {
        /// Plugin install directory (defaults to this executable's directory)
        #[arg(short, long)]
        install_dir: Option<PathBuf>,

        /// Tool configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Do not write a log file
        #[arg(long)]
        no_file: bool,

        /// Do not mirror the log to the listing window
        #[arg(long)]
        no_listing: bool,

        /// Do not show the resolved-path message boxes
        #[arg(short, long)]
        quiet_messages: bool,
    },

    /// Show the resolved input and output directories
    Paths {
        /// Plugin install directory (defaults to this executable's directory)
        #[arg(short, long)]
        install_dir: Option<PathBuf>,

        /// Tool configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Delete the files directly inside a directory
    Clean {
        /// Directory to clean
        dir: PathBuf,
    },
}

impl Cli {
    /// Run the CLI application
    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        init_tracing(cli.verbose);
        cli.execute()
    }

    /// Execute the parsed command
    fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Run {
                install_dir,
                config,
                no_file,
                no_listing,
                quiet_messages,
            } => {
                let mut tool_config = load_config(config.as_deref())?;
                tool_config.log_to_file &= !no_file;
                tool_config.log_to_listing &= !no_listing;
                tool_config.show_path_messages &= !quiet_messages;

                let install_dir = resolve_install_dir(install_dir.as_deref())?;
                run_plugin(install_dir, tool_config)
            }

            Commands::Paths {
                install_dir,
                config,
            } => {
                let tool_config = load_config(config.as_deref())?;
                let install_dir = resolve_install_dir(install_dir.as_deref())?;
                let paths = ToolPaths::resolve(&install_dir, &tool_config)?;
                output::print_paths(&paths);
                Ok(())
            }

            Commands::Clean { dir } => {
                let report = delete_files_in_directory(dir, None);
                output::print_cleanup_report(&report);
                Ok(())
            }
        }
    }
}

/// Load, report and unload the plugin against a console host
fn run_plugin(install_dir: PathBuf, config: ToolConfig) -> Result<()> {
    let host: Arc<dyn Host> = Arc::new(ConsoleHost::new());
    let registry = Arc::new(LoggerRegistry::new(Arc::clone(&host)));

    // Close the log cleanly if the run is interrupted
    let interrupted = Arc::clone(&registry);
    ctrlc::set_handler(move || {
        if let Err(e) = interrupted.dispose() {
            output::print_error(&format!("Failed to close log: {}", e));
        }
        std::process::exit(130);
    })
    .map_err(|e| NxSetupError::Other(format!("Failed to install Ctrl-C handler: {}", e)))?;

    let plugin = Plugin::new(host, registry, install_dir, config);
    tracing::debug!(option = ?plugin.unload_option(), "plugin unload policy");

    let Some(context) = plugin.load() else {
        return Err(NxSetupError::Other(
            "Tool setup failed (run with --verbose for details)".to_string(),
        ));
    };

    plugin.unload("");
    output::print_run_summary(&context);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ToolConfig> {
    match path {
        Some(path) => ToolConfig::from_file(path),
        None => Ok(ToolConfig::default()),
    }
}

fn resolve_install_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        NxSetupError::PathResolution(format!(
            "Executable path has no parent: {}",
            exe.display()
        ))
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Only fails when a global subscriber is already set; that one stays
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        tracing::debug!("keeping existing tracing subscriber: {}", e);
    }
}
