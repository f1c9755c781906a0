//! Building [`EnvArgs`] from command-line input.
//!
//! Values given as `key=value` are read as YAML scalars, so `turns=3` is a
//! number, `shuffle=true` a boolean and `split=train` a string.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::EnvArgs;
use crate::error::{EnvloadError, Result};

/// Parse a single `key=value` pair.
pub fn parse_arg_pair(pair: &str) -> Result<(String, Value)> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| EnvloadError::InvalidArgument {
            message: format!("expected key=value, got '{}'", pair),
        })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(EnvloadError::InvalidArgument {
            message: format!("missing key in '{}'", pair),
        });
    }

    Ok((key.to_string(), parse_arg_value(raw)))
}

/// Interpret a raw argument value.
///
/// Anything that does not parse as YAML is kept as a plain string.
pub fn parse_arg_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_yaml::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Load arguments from a YAML or JSON file containing a mapping.
pub fn load_args_file(path: &Path) -> Result<EnvArgs> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvloadError::InvalidArgument {
                message: format!("arguments file not found: {}", path.display()),
            }
        } else {
            EnvloadError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(EnvArgs::new());
    }

    // YAML is a superset of JSON, so one parser covers both.
    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| EnvloadError::InvalidArgument {
            message: format!("failed to parse {}: {}", path.display(), e),
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(EnvloadError::InvalidArgument {
            message: format!("{} must contain a mapping of arguments", path.display()),
        }),
    }
}
