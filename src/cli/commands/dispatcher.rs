//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, EnvloadConfig};
use crate::error::Result;
use crate::package::InstalledPackages;
use crate::resolver::EnvironmentResolver;
use crate::ui::Output;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing through `out`.
    fn execute(&self, out: &Output) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Project root and config location shared by commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            project_root,
            config_override,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load the effective configuration.
    pub fn config(&self) -> Result<EnvloadConfig> {
        load_config(&self.project_root, self.config_override.as_deref())
    }

    /// Build a resolver from the effective configuration.
    pub fn resolver(&self) -> Result<EnvironmentResolver> {
        let config = self.config()?;
        Ok(EnvironmentResolver::from_config(
            &config,
            Some(&self.project_root),
        ))
    }

    /// Installed packages visible from the project.
    pub fn packages(&self) -> Result<InstalledPackages> {
        let config = self.config()?;
        Ok(InstalledPackages::discover(
            Some(&self.project_root),
            &config.package_paths,
            Arc::new(config.script_loader()),
        ))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            context: CommandContext::new(project_root, config_override),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        self.context.project_root()
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &Output) -> Result<CommandResult> {
        match &cli.command {
            Commands::Resolve(args) => {
                super::resolve::ResolveCommand::new(self.context.clone(), args.clone())
                    .execute(out)
            }
            Commands::Classify(args) => {
                super::classify::ClassifyCommand::new(self.context.clone(), args.clone())
                    .execute(out)
            }
            Commands::Packages(args) => {
                super::packages::PackagesCommand::new(self.context.clone(), args.clone())
                    .execute(out)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(out)
            }
        }
    }
}
