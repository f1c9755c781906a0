//! Environment modules loaded from files.
//!
//! A module is a source file that exposes a `load_environment` entry point.
//! Modules run out of process: the file is executed by the interpreter
//! registered for its extension (or directly, when it is an executable
//! without a registered extension) and the call travels over a JSON envelope
//! on stdin/stdout. See [`envelope`] for the wire format.
//!
//! Each call spawns a fresh process, so two modules that share a file stem
//! never see each other's state.

pub mod envelope;
pub mod interpreter;
pub mod script;

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::environment::{EnvArgs, Environment};

pub use envelope::{Request, Response, PROTOCOL_VERSION};
pub use interpreter::{CommandLine, InterpreterTable, PYTHON_BOOTSTRAP};
pub use script::{ScriptLoader, ScriptModule};

/// Name of the function every environment module must expose.
pub const ENTRYPOINT: &str = "load_environment";

/// A module file turned into something callable.
pub trait Module: fmt::Debug {
    /// Module name, derived from the file name.
    fn name(&self) -> &str;

    /// Absolute path to the module file.
    fn path(&self) -> &Path;

    /// Invoke `entrypoint` with the given keyword arguments.
    fn call(&self, entrypoint: &str, args: &EnvArgs) -> Result<Environment, ModuleError>;
}

/// Turns module files into [`Module`]s.
pub trait ModuleLoader: fmt::Debug + Send + Sync {
    /// Whether `path` carries an extension this loader knows how to run.
    fn recognizes(&self, path: &Path) -> bool;

    /// Prepare the file at `path` as a module named `name`.
    fn load(&self, path: &Path, name: &str) -> Result<Box<dyn Module>, ModuleError>;
}

/// Derive a module name from a file path (its stem).
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A module does not expose the required entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Module '{module}' does not have a '{entrypoint}' function")]
pub struct ContractError {
    pub module: String,
    pub entrypoint: String,
}

impl ContractError {
    /// Contract error for the standard entry point.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            entrypoint: ENTRYPOINT.to_string(),
        }
    }
}

/// Failures while loading or invoking a module.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Nothing knows how to run this file.
    #[error("Could not load module from {path}: no interpreter registered for this file type")]
    Unsupported { path: PathBuf },

    /// The interpreter or executable could not be started.
    #[error("Could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be encoded.
    #[error("Could not encode request for module '{module}': {source}")]
    Encode {
        module: String,
        #[source]
        source: serde_json::Error,
    },

    /// The module exited without producing a response.
    #[error("Module '{module}' exited with {} without a response{}", format_code(.code), format_stderr(.stderr))]
    Exited {
        module: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The module's response was not a valid envelope.
    #[error("Module '{module}' returned an invalid response: {message}")]
    InvalidResponse { module: String, message: String },

    /// The entry point is missing.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The entry point raised an error.
    #[error("{}", format_raised(.kind, .message))]
    Raised {
        module: String,
        kind: Option<String>,
        message: String,
    },
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

fn format_raised(kind: &Option<String>, message: &str) -> String {
    match kind {
        Some(kind) => format!("{}: {}", kind, message),
        None => message.to_string(),
    }
}
