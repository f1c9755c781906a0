//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// envload - Resolve environment identifiers to loaded environments.
#[derive(Debug, Parser)]
#[command(name = "envload")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .envload/config.yml discovery)
    #[arg(short, long, global = true, env = "ENVLOAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Only print results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load an environment from a module file or installed package
    Resolve(ResolveArgs),

    /// Show whether an identifier is a module file or a package reference
    Classify(ClassifyArgs),

    /// List installed environment packages
    Packages(PackagesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Module file path or package name
    pub identifier: String,

    /// Environment argument as key=value (repeatable)
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
    pub args: Vec<String>,

    /// YAML or JSON file with environment arguments
    #[arg(long, value_name = "FILE")]
    pub args_file: Option<PathBuf>,

    /// Print the environment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `classify` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ClassifyArgs {
    /// Module file path or package name
    pub identifier: String,
}

/// Arguments for the `packages` command.
#[derive(Debug, Clone, clap::Args)]
pub struct PackagesArgs {
    /// Print the package list as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resolve_with_args() {
        let cli = Cli::try_parse_from([
            "envload", "resolve", "wordle", "-a", "turns=6", "--arg", "hard=true", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.identifier, "wordle");
                assert_eq!(args.args, vec!["turns=6", "hard=true"]);
                assert!(args.json);
            }
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["envload", "classify", "x.sh", "--debug", "--quiet"]).unwrap();
        assert!(cli.debug);
        assert!(cli.quiet);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["envload"]).is_err());
    }

    #[test]
    fn resolve_requires_identifier() {
        assert!(Cli::try_parse_from(["envload", "resolve"]).is_err());
    }
}
