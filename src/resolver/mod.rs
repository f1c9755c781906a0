//! Environment resolution.
//!
//! [`EnvironmentResolver::resolve`] turns an identifier into an
//! [`Environment`]:
//!
//! 1. Identifiers with a recognized module extension, or naming an existing
//!    file, are loaded as modules. Every failure after the existence check
//!    is reported as [`EnvloadError::LoadFailed`].
//! 2. Everything else goes to the [`PackageLoader`]; its result and errors
//!    are returned as they are.
//!
//! # Example
//!
//! ```no_run
//! use envload::environment::EnvArgs;
//! use envload::resolver::EnvironmentResolver;
//! use serde_json::json;
//!
//! let resolver = EnvironmentResolver::default();
//! let mut args = EnvArgs::new();
//! args.insert("max_turns".into(), json!(6));
//!
//! let env = resolver.resolve("./envs/wordle.py", &args).unwrap();
//! assert_eq!(env.env_id, "./envs/wordle.py");
//! ```

pub mod identifier;

use std::path::Path;
use std::sync::Arc;

use crate::config::EnvloadConfig;
use crate::environment::{EnvArgs, Environment};
use crate::error::{EnvloadError, Result};
use crate::module::{module_name, ModuleError, ModuleLoader, ENTRYPOINT};
use crate::package::{InstalledPackages, PackageLoader};

pub use identifier::{classify, IdentifierKind};

/// Resolves environment identifiers to loaded environments.
#[derive(Clone)]
pub struct EnvironmentResolver {
    modules: Arc<dyn ModuleLoader>,
    packages: Arc<dyn PackageLoader>,
}

impl Default for EnvironmentResolver {
    fn default() -> Self {
        Self::from_config(&EnvloadConfig::default(), None)
    }
}

impl EnvironmentResolver {
    /// Create a resolver from explicit collaborators.
    pub fn new(modules: Arc<dyn ModuleLoader>, packages: Arc<dyn PackageLoader>) -> Self {
        Self { modules, packages }
    }

    /// Create a resolver with the script loader and installed packages
    /// described by `config`.
    pub fn from_config(config: &EnvloadConfig, project_root: Option<&Path>) -> Self {
        let modules: Arc<dyn ModuleLoader> = Arc::new(config.script_loader());
        let packages = InstalledPackages::discover(
            project_root,
            &config.package_paths,
            Arc::clone(&modules),
        );
        Self::new(modules, Arc::new(packages))
    }

    /// Use a different package loader.
    pub fn with_packages(mut self, packages: Arc<dyn PackageLoader>) -> Self {
        self.packages = packages;
        self
    }

    /// Classify an identifier without loading anything.
    pub fn classify(&self, identifier: &str) -> IdentifierKind {
        classify(identifier, self.modules.as_ref())
    }

    /// Resolve `identifier` to an environment constructed with `args`.
    pub fn resolve(&self, identifier: &str, args: &EnvArgs) -> Result<Environment> {
        if identifier.trim().is_empty() {
            return Err(EnvloadError::EmptyIdentifier);
        }

        match self.classify(identifier) {
            IdentifierKind::File(path) => self.resolve_file(identifier, &path, args),
            IdentifierKind::Package(env_id) => {
                tracing::debug!("Delegating '{}' to the package loader", env_id);
                self.packages
                    .load_environment(&env_id, args)
                    .map_err(EnvloadError::Package)
            }
        }
    }

    fn resolve_file(&self, identifier: &str, path: &Path, args: &EnvArgs) -> Result<Environment> {
        let absolute = std::path::absolute(path)?;
        tracing::info!("Loading environment from file: {}", absolute.display());

        if !absolute.exists() {
            return Err(EnvloadError::EnvironmentNotFound { path: absolute });
        }

        let name = module_name(&absolute);
        match self.load_module(&absolute, &name, args) {
            Ok(mut env) => {
                env.record_origin(identifier, args);
                tracing::info!("Successfully loaded environment from file '{}'", identifier);
                Ok(env)
            }
            Err(source) => {
                tracing::error!(
                    "Failed to load environment from file {}: {}",
                    absolute.display(),
                    source
                );
                Err(EnvloadError::LoadFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    fn load_module(
        &self,
        path: &Path,
        name: &str,
        args: &EnvArgs,
    ) -> std::result::Result<Environment, ModuleError> {
        let module = self.modules.load(path, name)?;
        module.call(ENTRYPOINT, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{ContractError, Module};
    use serde_json::json;
    use std::error::Error as _;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// What a [`FakeModule`] does when called.
    #[derive(Debug, Clone)]
    enum Behavior {
        Echo,
        Returns(Environment),
        NoEntrypoint,
        Raises(&'static str),
    }

    #[derive(Debug)]
    struct FakeModule {
        name: String,
        path: PathBuf,
        behavior: Behavior,
    }

    impl Module for FakeModule {
        fn name(&self) -> &str {
            &self.name
        }

        fn path(&self) -> &Path {
            &self.path
        }

        fn call(&self, entrypoint: &str, args: &EnvArgs) -> std::result::Result<Environment, ModuleError> {
            assert_eq!(entrypoint, ENTRYPOINT);
            match &self.behavior {
                Behavior::Echo => Ok(Environment {
                    env_args: args.clone(),
                    ..Default::default()
                }),
                Behavior::Returns(env) => Ok(env.clone()),
                Behavior::NoEntrypoint => Err(ContractError::new(self.name.clone()).into()),
                Behavior::Raises(message) => Err(ModuleError::Raised {
                    module: self.name.clone(),
                    kind: None,
                    message: message.to_string(),
                }),
            }
        }
    }

    #[derive(Debug)]
    struct FakeLoader {
        behavior: Behavior,
    }

    impl ModuleLoader for FakeLoader {
        fn recognizes(&self, path: &Path) -> bool {
            path.extension().is_some_and(|e| e == "env")
        }

        fn load(&self, path: &Path, name: &str) -> std::result::Result<Box<dyn Module>, ModuleError> {
            Ok(Box::new(FakeModule {
                name: name.to_string(),
                path: path.to_path_buf(),
                behavior: self.behavior.clone(),
            }))
        }
    }

    #[derive(Default)]
    struct RecordingPackages {
        calls: Mutex<Vec<(String, EnvArgs)>>,
    }

    impl PackageLoader for RecordingPackages {
        fn load_environment(&self, env_id: &str, args: &EnvArgs) -> anyhow::Result<Environment> {
            self.calls
                .lock()
                .unwrap()
                .push((env_id.to_string(), args.clone()));
            if env_id == "broken" {
                anyhow::bail!("package '{}' exploded", env_id);
            }
            Ok(Environment::new().with_attribute("from", "package"))
        }
    }

    fn resolver(behavior: Behavior) -> (EnvironmentResolver, Arc<RecordingPackages>) {
        let packages = Arc::new(RecordingPackages::default());
        let resolver = EnvironmentResolver::new(
            Arc::new(FakeLoader { behavior }),
            Arc::clone(&packages) as Arc<dyn PackageLoader>,
        );
        (resolver, packages)
    }

    fn module_file(temp: &TempDir, name: &str) -> String {
        let path = temp.path().join(name);
        fs::write(&path, "").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn args(value: serde_json::Value) -> EnvArgs {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let (resolver, packages) = resolver(Behavior::Echo);
        assert!(matches!(
            resolver.resolve("  ", &EnvArgs::new()),
            Err(EnvloadError::EmptyIdentifier)
        ));
        assert!(packages.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn file_module_receives_args_and_records_origin() {
        let temp = TempDir::new().unwrap();
        let id = module_file(&temp, "math.env");
        let (resolver, _) = resolver(Behavior::Echo);

        let env = resolver.resolve(&id, &args(json!({"a": 1}))).unwrap();
        assert_eq!(env.env_args, args(json!({"a": 1})));
        assert_eq!(env.env_id, id);
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let id = temp.path().join("missing.env");
        let (resolver, packages) = resolver(Behavior::Echo);

        let err = resolver
            .resolve(id.to_str().unwrap(), &EnvArgs::new())
            .unwrap_err();
        match err {
            EnvloadError::EnvironmentNotFound { path } => assert_eq!(path, id),
            other => panic!("expected not found, got {:?}", other),
        }
        assert!(packages.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn relative_missing_file_reports_absolute_path() {
        let (resolver, _) = resolver(Behavior::Echo);
        let err = resolver
            .resolve("definitely-missing-dir/x.env", &EnvArgs::new())
            .unwrap_err();
        match err {
            EnvloadError::EnvironmentNotFound { path } => assert!(path.is_absolute()),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn missing_entrypoint_is_wrapped_and_names_module() {
        let temp = TempDir::new().unwrap();
        let id = module_file(&temp, "bare.env");
        let (resolver, _) = resolver(Behavior::NoEntrypoint);

        let err = resolver.resolve(&id, &EnvArgs::new()).unwrap_err();
        assert!(matches!(
            err,
            EnvloadError::LoadFailed {
                source: ModuleError::Contract(_),
                ..
            }
        ));
        assert!(err.to_string().contains("bare"));
        assert!(err.to_string().contains(&id));
    }

    #[test]
    fn raised_error_is_wrapped_with_message_in_chain() {
        let temp = TempDir::new().unwrap();
        let id = module_file(&temp, "raises.env");
        let (resolver, _) = resolver(Behavior::Raises("dataset unavailable"));

        let err = resolver.resolve(&id, &EnvArgs::new()).unwrap_err();
        assert!(matches!(err, EnvloadError::LoadFailed { .. }));
        assert_eq!(err.source().unwrap().to_string(), "dataset unavailable");
        assert!(err.to_string().contains("dataset unavailable"));
    }

    #[test]
    fn loader_values_are_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let id = module_file(&temp, "custom.env");
        let preset = Environment {
            env_id: "preset-id".into(),
            env_args: args(json!({"preset": true})),
            ..Default::default()
        };
        let (resolver, _) = resolver(Behavior::Returns(preset));

        let env = resolver.resolve(&id, &args(json!({"a": 1}))).unwrap();
        assert_eq!(env.env_id, "preset-id");
        assert_eq!(env.env_args, args(json!({"preset": true})));
    }

    #[test]
    fn package_reference_delegates_once_unchanged() {
        let (resolver, packages) = resolver(Behavior::Echo);
        let supplied = args(json!({"split": "train"}));

        let env = resolver.resolve("wordle", &supplied).unwrap();

        assert_eq!(env, Environment::new().with_attribute("from", "package"));
        let calls = packages.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("wordle".to_string(), supplied));
    }

    #[test]
    fn package_errors_pass_through() {
        let (resolver, _) = resolver(Behavior::Echo);

        let err = resolver.resolve("broken", &EnvArgs::new()).unwrap_err();
        assert!(matches!(err, EnvloadError::Package(_)));
        assert_eq!(err.to_string(), "package 'broken' exploded");
    }

    #[test]
    fn existing_file_with_unrecognized_extension_is_a_module() {
        let temp = TempDir::new().unwrap();
        let id = module_file(&temp, "notes.txt");
        let (resolver, packages) = resolver(Behavior::Echo);

        resolver.resolve(&id, &EnvArgs::new()).unwrap();
        assert!(packages.calls.lock().unwrap().is_empty());
    }
}
