//! Configuration schema definitions for envload.
//!
//! These structs map to the YAML configuration file format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::module::{CommandLine, InterpreterTable, ScriptLoader};

/// Root configuration structure for `.envload/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvloadConfig {
    /// Extra interpreters keyed by file extension, merged over the built-ins.
    ///
    /// ```yaml
    /// interpreters:
    ///   rb: [ruby]
    ///   py: [uv, run, python]
    /// ```
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub interpreters: BTreeMap<String, Vec<String>>,

    /// Run executable module files that have no registered extension.
    pub run_executables: bool,

    /// Extra package directories, searched before the default ones.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub package_paths: Vec<PathBuf>,
}

impl Default for EnvloadConfig {
    fn default() -> Self {
        Self {
            interpreters: BTreeMap::new(),
            run_executables: true,
            package_paths: Vec::new(),
        }
    }
}

impl EnvloadConfig {
    /// Built-in interpreters with configured overrides applied.
    ///
    /// A `py` override names the Python to use; modules still run through
    /// the bootstrap.
    ///
    /// Entries with an empty command line are ignored; [`validate`] reports
    /// them.
    ///
    /// [`validate`]: crate::config::validate
    pub fn interpreter_table(&self) -> InterpreterTable {
        let mut table = InterpreterTable::builtin();
        for (extension, parts) in &self.interpreters {
            if let Some(command) = CommandLine::from_parts(parts) {
                let command = if extension.trim_start_matches('.') == "py" {
                    command.with_python_bootstrap()
                } else {
                    command
                };
                table.insert(extension, command);
            }
        }
        table
    }

    /// Module loader configured from this config.
    pub fn script_loader(&self) -> ScriptLoader {
        ScriptLoader::new(self.interpreter_table()).run_executables(self.run_executables)
    }
}
