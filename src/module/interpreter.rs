//! Mapping from file extensions to the programs that run them.

use std::collections::BTreeMap;
use std::path::Path;

/// Python runner that imports a module file and calls its entry point.
///
/// Invoked as `python3 -c <bootstrap> <module path>`; it reads the request
/// envelope and prints the response envelope.
pub const PYTHON_BOOTSTRAP: &str = include_str!("bootstrap.py");

/// Placeholder shown instead of the bootstrap source in logs.
const BOOTSTRAP_LABEL: &str = "<bootstrap>";

/// A program plus the arguments placed before the module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// A bare program with no leading arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from `[program, args...]`. Returns `None` when empty.
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        let (program, args) = parts.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Append the Python bootstrap so plain `.py` modules can be called.
    pub fn with_python_bootstrap(mut self) -> Self {
        self.args.push("-c".to_string());
        self.args.push(PYTHON_BOOTSTRAP.to_string());
        self
    }

    /// Render for log and error messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(|arg| {
                if arg == PYTHON_BOOTSTRAP {
                    BOOTSTRAP_LABEL
                } else {
                    arg.as_str()
                }
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Interpreters keyed by file extension (without the leading dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterTable {
    entries: BTreeMap<String, CommandLine>,
}

impl Default for InterpreterTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl InterpreterTable {
    /// The built-in table: `py` (through [`PYTHON_BOOTSTRAP`]) and `sh`.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert("py", CommandLine::new("python3").with_python_bootstrap());
        table.insert("sh", CommandLine::new("sh"));
        table
    }

    /// A table with no interpreters.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register or replace the interpreter for `extension`.
    pub fn insert(&mut self, extension: &str, command: CommandLine) {
        self.entries
            .insert(normalize_extension(extension).to_string(), command);
    }

    /// Interpreter for an extension.
    pub fn get(&self, extension: &str) -> Option<&CommandLine> {
        self.entries.get(normalize_extension(extension))
    }

    /// Interpreter for a file, chosen by its extension.
    pub fn for_path(&self, path: &Path) -> Option<&CommandLine> {
        let extension = path.extension()?.to_str()?;
        self.entries.get(extension)
    }

    /// Whether the file's extension has an interpreter.
    pub fn recognizes(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

fn normalize_extension(extension: &str) -> &str {
    extension.strip_prefix('.').unwrap_or(extension)
}
