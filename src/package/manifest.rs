//! Package manifest (`package.yml`) parsing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::PackageError;
use crate::environment::EnvArgs;

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.yml";

/// Contents of `package.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name. Defaults to the directory name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Module file, relative to the package directory.
    pub entrypoint: PathBuf,

    /// Arguments applied when the caller does not supply them.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub defaults: EnvArgs,
}

impl PackageManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, PackageError> {
        let content = fs::read_to_string(path).map_err(|e| PackageError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Parse manifest content. `path` is used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<Self, PackageError> {
        serde_yaml::from_str(content).map_err(|e| PackageError::ManifestParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Arguments with defaults filled in. Supplied values win.
    pub fn effective_args(&self, supplied: &EnvArgs) -> EnvArgs {
        let mut args = self.defaults.clone();
        for (key, value) in supplied {
            args.insert(key.clone(), value.clone());
        }
        args
    }
}
