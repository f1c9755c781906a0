//! envload - Resolve environment identifiers to loaded environments.
//!
//! An identifier names either a module file on disk or an installed
//! package. Module files run as subprocesses that answer a single
//! `load_environment` call; packages are looked up in package directories
//! and loaded the same way. Either way the returned [`Environment`] records
//! the identifier and arguments it was created from.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`environment`] - The environment value and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`module`] - Running module files and the call protocol
//! - [`package`] - Installed package discovery and loading
//! - [`resolver`] - Identifier classification and dispatch
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use envload::environment::parse_arg_pair;
//! use serde_json::json;
//!
//! let (key, value) = parse_arg_pair("max_turns=6").unwrap();
//! assert_eq!(key, "max_turns");
//! assert_eq!(value, json!(6));
//! ```
//!
//! For loading module files end to end, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod module;
pub mod package;
pub mod resolver;
pub mod ui;

pub use environment::{EnvArgs, Environment};
pub use error::{EnvloadError, Result};
pub use resolver::EnvironmentResolver;
