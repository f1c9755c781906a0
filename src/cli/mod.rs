//! Command-line interface for envload.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{ClassifyArgs, Cli, Commands, CompletionsArgs, PackagesArgs, ResolveArgs};
pub use commands::{Command, CommandContext, CommandDispatcher, CommandResult};
