//! Error types for envload operations.
//!
//! This module defines [`EnvloadError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every failure inside the file-module branch surfaces as
//!   [`EnvloadError::LoadFailed`], with the underlying [`ModuleError`] kept as
//!   its source
//! - Errors raised by a [`PackageLoader`](crate::package::PackageLoader) pass
//!   through [`EnvloadError::Package`] untouched and can be downcast
//! - Use `anyhow::Error` (via `EnvloadError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::module::ModuleError;

/// Core error type for envload operations.
#[derive(Debug, Error)]
pub enum EnvloadError {
    /// The identifier was empty or whitespace.
    #[error("Environment identifier is empty")]
    EmptyIdentifier,

    /// The identifier named a module file that does not exist.
    #[error("Environment file not found: {path}")]
    EnvironmentNotFound { path: PathBuf },

    /// Loading or invoking a module file failed.
    #[error("Failed to load environment from file '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: ModuleError,
    },

    /// Error raised by the package loader, passed through as-is.
    #[error(transparent)]
    Package(anyhow::Error),

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A command-line argument could not be interpreted.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EnvloadError {
    /// Whether this error means the requested environment does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::EnvironmentNotFound { .. } => true,
            Self::Package(e) => matches!(
                e.downcast_ref::<crate::package::PackageError>(),
                Some(crate::package::PackageError::NotInstalled { .. })
            ),
            _ => false,
        }
    }
}

/// Result type alias for envload operations.
pub type Result<T> = std::result::Result<T, EnvloadError>;
