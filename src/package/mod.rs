//! Package-level environment loading.
//!
//! Identifiers that are not module files are handed to a [`PackageLoader`].
//! Whatever it returns, success or error, reaches the caller unchanged.
//!
//! The default loader, [`InstalledPackages`], looks for package directories
//! containing a `package.yml` manifest. Search roots, first match wins:
//!
//! 1. Configured `package_paths`
//! 2. Project-local (`.envload/packages/`)
//! 3. User-local (`~/.envload/packages/`)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use envload::module::ScriptLoader;
//! use envload::package::{InstalledPackages, PackageLoader};
//!
//! let packages = InstalledPackages::discover(None, &[], Arc::new(ScriptLoader::default()));
//! let env = packages.load_environment("wordle", &Default::default()).unwrap();
//! println!("{}", env.env_id);
//! ```

pub mod installed;
pub mod manifest;

use std::path::PathBuf;

use thiserror::Error;

use crate::environment::{EnvArgs, Environment};
use crate::module::ModuleError;

pub use installed::{InstalledPackage, InstalledPackages};
pub use manifest::{PackageManifest, MANIFEST_FILE};

/// Loads environments that are referenced by package name.
pub trait PackageLoader: Send + Sync {
    /// Load the environment `env_id` with the given keyword arguments.
    fn load_environment(&self, env_id: &str, args: &EnvArgs) -> anyhow::Result<Environment>;
}

/// Errors raised by [`InstalledPackages`].
#[derive(Debug, Error)]
pub enum PackageError {
    /// No installed package has this name.
    #[error("Environment package '{env_id}' is not installed (searched: {})", format_paths(.searched))]
    NotInstalled {
        env_id: String,
        searched: Vec<PathBuf>,
    },

    /// A manifest could not be read or parsed.
    #[error("Invalid package manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The manifest points at a module file that does not exist.
    #[error("Package '{package}' entrypoint not found: {path}")]
    EntrypointMissing { package: String, path: PathBuf },

    /// The package's module failed to load or run.
    #[error("Package '{package}' failed to load: {source}")]
    Module {
        package: String,
        #[source]
        source: ModuleError,
    },
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no package directories".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
