//! Configuration loading, parsing, and validation for envload.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use envload::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".envload");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "interpreters:\n  rb: [ruby]\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert!(config.interpreter_table().get("rb").is_some());
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    ConfigPaths,
};
pub use merger::{deep_merge, merge_configs};
pub use schema::EnvloadConfig;
pub use validator::{validate, validate_config, ValidationError};
