//! Configuration validation rules.
//!
//! - Interpreter extensions must be non-empty
//! - Interpreter command lines must name a program
//! - Package paths must be non-empty

use crate::config::schema::EnvloadConfig;
use crate::error::{EnvloadError, Result};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier.
    pub rule: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Collect every validation problem in `config`.
pub fn validate_config(config: &EnvloadConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (extension, command) in &config.interpreters {
        let extension = extension.trim_start_matches('.');
        if extension.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-extension",
                message: "Interpreter entries need a file extension".to_string(),
            });
        }
        if command.first().map_or(true, |program| program.trim().is_empty()) {
            errors.push(ValidationError {
                rule: "empty-interpreter",
                message: format!("Interpreter for '.{}' has no program", extension),
            });
        }
    }

    for path in &config.package_paths {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError {
                rule: "empty-package-path",
                message: "package_paths contains an empty entry".to_string(),
            });
        }
    }

    errors
}

/// Validate `config`, failing with all problems joined into one message.
pub fn validate(config: &EnvloadConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    Err(EnvloadError::ConfigValidationError {
        message: errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> EnvloadConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&EnvloadConfig::default()).is_ok());
    }

    #[test]
    fn rejects_empty_interpreter() {
        let errors = validate_config(&config("interpreters:\n  rb: []\n"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "empty-interpreter");
        assert!(errors[0].message.contains(".rb"));
    }

    #[test]
    fn rejects_blank_program() {
        let errors = validate_config(&config("interpreters:\n  rb: ['  ']\n"));
        assert_eq!(errors[0].rule, "empty-interpreter");
    }

    #[test]
    fn rejects_empty_extension() {
        let errors = validate_config(&config("interpreters:\n  '.': [ruby]\n"));
        assert_eq!(errors[0].rule, "empty-extension");
    }

    #[test]
    fn rejects_empty_package_path() {
        let errors = validate_config(&config("package_paths: ['']\n"));
        assert_eq!(errors[0].rule, "empty-package-path");
    }

    #[test]
    fn validate_joins_messages() {
        let err = validate(&config(
            "interpreters:\n  rb: []\n  lua: []\n",
        ))
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(".lua"));
        assert!(msg.contains(".rb"));
    }
}
