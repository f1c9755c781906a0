//! Packages installed in local directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::manifest::{PackageManifest, MANIFEST_FILE};
use super::{PackageError, PackageLoader};
use crate::environment::{EnvArgs, Environment};
use crate::module::{module_name, ModuleLoader, ENTRYPOINT};

/// A package found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledPackage {
    /// Package name (from the manifest, or the directory name).
    pub name: String,
    /// Package directory.
    pub root: PathBuf,
    /// Parsed manifest.
    pub manifest: PackageManifest,
}

impl InstalledPackage {
    fn from_dir(dir: &Path) -> Result<Self, PackageError> {
        let manifest = PackageManifest::load(&dir.join(MANIFEST_FILE))?;
        let name = manifest.name.clone().unwrap_or_else(|| dir_name(dir));
        Ok(Self {
            name,
            root: dir.to_path_buf(),
            manifest,
        })
    }

    /// Absolute path to the package's module file.
    pub fn entrypoint_path(&self) -> PathBuf {
        self.root.join(&self.manifest.entrypoint)
    }

    /// Package description, if any.
    pub fn description(&self) -> Option<&str> {
        self.manifest.description.as_deref()
    }
}

/// [`PackageLoader`] backed by package directories on disk.
#[derive(Debug, Clone)]
pub struct InstalledPackages {
    roots: Vec<PathBuf>,
    modules: Arc<dyn ModuleLoader>,
}

impl InstalledPackages {
    /// Search the given roots, in order.
    pub fn new(roots: Vec<PathBuf>, modules: Arc<dyn ModuleLoader>) -> Self {
        Self { roots, modules }
    }

    /// Search configured paths, then project and user package directories.
    ///
    /// Relative `extra` paths are taken relative to `project_root`.
    pub fn discover(
        project_root: Option<&Path>,
        extra: &[PathBuf],
        modules: Arc<dyn ModuleLoader>,
    ) -> Self {
        let mut roots: Vec<PathBuf> = extra
            .iter()
            .map(|p| match project_root {
                Some(root) if p.is_relative() => root.join(p),
                _ => p.clone(),
            })
            .collect();

        if let Some(root) = project_root {
            roots.push(root.join(".envload").join("packages"));
        }
        if let Some(user_dir) = Self::user_packages_dir() {
            roots.push(user_dir);
        }

        Self::new(roots, modules)
    }

    /// User packages directory (`~/.envload/packages`).
    fn user_packages_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".envload").join("packages"))
    }

    /// Search roots in priority order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find an installed package by name.
    ///
    /// `-` and `_` are interchangeable and matching ignores case.
    pub fn find(&self, env_id: &str) -> Result<InstalledPackage, PackageError> {
        let wanted = normalize_name(env_id);

        for root in &self.roots {
            for dir in package_dirs(root) {
                // A directory named after the package must load cleanly.
                if normalize_name(&dir_name(&dir)) == wanted {
                    return InstalledPackage::from_dir(&dir);
                }

                match InstalledPackage::from_dir(&dir) {
                    Ok(package) if normalize_name(&package.name) == wanted => return Ok(package),
                    Ok(_) => {}
                    Err(e) => tracing::debug!("Skipping {}: {}", dir.display(), e),
                }
            }
        }

        Err(PackageError::NotInstalled {
            env_id: env_id.to_string(),
            searched: self.roots.clone(),
        })
    }

    /// All installed packages, sorted by name.
    ///
    /// When two roots provide the same name, the earlier root wins.
    /// Packages with broken manifests are skipped.
    pub fn list(&self) -> Vec<InstalledPackage> {
        let mut packages: Vec<InstalledPackage> = Vec::new();

        for root in &self.roots {
            for dir in package_dirs(root) {
                match InstalledPackage::from_dir(&dir) {
                    Ok(package) => {
                        let key = normalize_name(&package.name);
                        if !packages.iter().any(|p| normalize_name(&p.name) == key) {
                            packages.push(package);
                        }
                    }
                    Err(e) => tracing::warn!("Skipping package at {}: {}", dir.display(), e),
                }
            }
        }

        packages.sort_by(|a, b| a.name.cmp(&b.name));
        packages
    }
}

impl PackageLoader for InstalledPackages {
    fn load_environment(&self, env_id: &str, args: &EnvArgs) -> anyhow::Result<Environment> {
        let package = self.find(env_id)?;
        let path = package.entrypoint_path();
        tracing::info!(
            "Loading environment '{}' from package at {}",
            env_id,
            package.root.display()
        );

        if !path.is_file() {
            return Err(PackageError::EntrypointMissing {
                package: package.name,
                path,
            }
            .into());
        }

        let args = package.manifest.effective_args(args);
        let name = module_name(&path);

        let mut env = self
            .modules
            .load(&path, &name)
            .and_then(|module| module.call(ENTRYPOINT, &args))
            .map_err(|source| PackageError::Module {
                package: package.name.clone(),
                source,
            })?;

        env.record_origin(env_id, &args);
        tracing::info!("Successfully loaded environment package '{}'", package.name);
        Ok(env)
    }
}

/// Subdirectories of `root` that contain a manifest, sorted by name.
fn package_dirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir() && path.join(MANIFEST_FILE).is_file())
        .collect();
    dirs.sort();
    dirs
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn normalize_name(name: &str) -> String {
    name.trim().replace('_', "-").to_lowercase()
}
