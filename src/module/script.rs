//! Running module files as subprocesses.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;

use super::envelope::{Request, Response};
use super::interpreter::{CommandLine, InterpreterTable};
use super::{Module, ModuleError, ModuleLoader};
use crate::environment::{EnvArgs, Environment};

/// Lines of stderr kept in [`ModuleError::Exited`].
const STDERR_TAIL_LINES: usize = 20;

/// Loads modules by running them with a registered interpreter.
#[derive(Debug, Clone)]
pub struct ScriptLoader {
    interpreters: InterpreterTable,
    run_executables: bool,
}

impl Default for ScriptLoader {
    fn default() -> Self {
        Self::new(InterpreterTable::builtin())
    }
}

impl ScriptLoader {
    /// Create a loader using the given interpreters.
    pub fn new(interpreters: InterpreterTable) -> Self {
        Self {
            interpreters,
            run_executables: true,
        }
    }

    /// Whether executable files without a registered extension run directly.
    pub fn run_executables(mut self, enabled: bool) -> Self {
        self.run_executables = enabled;
        self
    }

    /// The interpreter table in use.
    pub fn interpreters(&self) -> &InterpreterTable {
        &self.interpreters
    }

    fn launcher_for(&self, path: &Path) -> Option<Launcher> {
        if let Some(interpreter) = self.interpreters.for_path(path) {
            return Some(Launcher::Interpreter(interpreter.clone()));
        }
        if self.run_executables && is_executable(path) {
            return Some(Launcher::Direct);
        }
        None
    }
}

/// How a module file gets started.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Launcher {
    /// Pass the file to an interpreter.
    Interpreter(CommandLine),
    /// Execute the file itself.
    Direct,
}

impl Launcher {
    fn program(&self, path: &Path) -> String {
        match self {
            Self::Interpreter(cmd) => cmd.program.clone(),
            Self::Direct => path.to_string_lossy().into_owned(),
        }
    }

    fn display(&self) -> String {
        match self {
            Self::Interpreter(cmd) => cmd.display(),
            Self::Direct => "direct execution".to_string(),
        }
    }
}

impl ModuleLoader for ScriptLoader {
    fn recognizes(&self, path: &Path) -> bool {
        self.interpreters.recognizes(path)
    }

    fn load(&self, path: &Path, name: &str) -> Result<Box<dyn Module>, ModuleError> {
        // Modules run from their own directory.
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let launcher = self
            .launcher_for(&path)
            .ok_or_else(|| ModuleError::Unsupported { path: path.clone() })?;

        tracing::debug!(
            "Prepared module '{}' from {} via '{}'",
            name,
            path.display(),
            launcher.display()
        );

        Ok(Box::new(ScriptModule {
            name: name.to_string(),
            path,
            launcher,
        }))
    }
}

/// A module file together with the command that runs it.
#[derive(Debug, Clone)]
pub struct ScriptModule {
    name: String,
    path: PathBuf,
    launcher: Launcher,
}

impl ScriptModule {
    fn command(&self, request: &Request) -> Result<Command, ModuleError> {
        let mut cmd = match &self.launcher {
            Launcher::Interpreter(interpreter) => {
                let mut cmd = Command::new(&interpreter.program);
                cmd.args(&interpreter.args).arg(&self.path);
                cmd
            }
            Launcher::Direct => Command::new(&self.path),
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }

        let vars = request.env_vars().map_err(|source| ModuleError::Encode {
            module: self.name.clone(),
            source,
        })?;
        for (key, value) in vars {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        Ok(cmd)
    }

    fn run(&self, request: &Request) -> Result<Output, ModuleError> {
        let mut payload = serde_json::to_string(request).map_err(|source| ModuleError::Encode {
            module: self.name.clone(),
            source,
        })?;
        payload.push('\n');

        let mut cmd = self.command(request)?;
        tracing::debug!(
            "Running module '{}' from {} ({})",
            self.name,
            self.path.display(),
            self.launcher.display()
        );

        let mut child = cmd.spawn().map_err(|source| ModuleError::Spawn {
            program: self.launcher.program(&self.path),
            source,
        })?;

        // Modules may exit without reading stdin.
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || stdin.write_all(payload.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|source| ModuleError::Spawn {
                program: self.launcher.program(&self.path),
                source,
            })?;

        if let Some(Ok(Err(e))) = writer.map(|handle| handle.join()) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                tracing::debug!("Failed to write request to module '{}': {}", self.name, e);
            }
        }

        Ok(output)
    }

    fn interpret(&self, output: Output, entrypoint: &str) -> Result<Environment, ModuleError> {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
        let last = lines.pop();

        for line in lines {
            tracing::debug!("[{}] {}", self.name, line);
        }
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!("[{}] {}", self.name, line);
        }

        match last.map(Response::parse) {
            Some(Ok(response)) => response.into_result(&self.name, entrypoint),
            _ if !output.status.success() => Err(ModuleError::Exited {
                module: self.name.clone(),
                code: output.status.code(),
                stderr: stderr_tail(&stderr),
            }),
            Some(Err(e)) => Err(ModuleError::InvalidResponse {
                module: self.name.clone(),
                message: e.to_string(),
            }),
            None => Err(ModuleError::InvalidResponse {
                module: self.name.clone(),
                message: "module produced no output".to_string(),
            }),
        }
    }
}

impl Module for ScriptModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn call(&self, entrypoint: &str, args: &EnvArgs) -> Result<Environment, ModuleError> {
        let request = Request::new(&self.name, entrypoint, args);
        let output = self.run(&request)?;
        self.interpret(output, entrypoint)
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
