//! Telling module files apart from package references.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::module::ModuleLoader;

/// What an environment identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    /// A module file on disk.
    File(PathBuf),
    /// A package reference for the package loader.
    Package(String),
}

impl IdentifierKind {
    /// Whether this is a module file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Package(id) => write!(f, "package {}", id),
        }
    }
}

/// Classify an identifier.
///
/// In order:
/// 1. A path with an extension `modules` recognizes is a file.
/// 2. A path naming an existing regular file is a file.
/// 3. Anything else is a package reference.
pub fn classify(identifier: &str, modules: &dyn ModuleLoader) -> IdentifierKind {
    let path = Path::new(identifier);

    if modules.recognizes(path) || path.is_file() {
        IdentifierKind::File(path.to_path_buf())
    } else {
        IdentifierKind::Package(identifier.to_string())
    }
}
