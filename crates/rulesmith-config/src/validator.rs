//! Configuration validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::schema::{Config, ResolvedPaths};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error, if any, into a `ConfigError`.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration together with its resolved paths.
    pub fn validate(
        config: &Config,
        resolved: &ResolvedPaths,
    ) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_not_empty(config, &mut result);
        Self::validate_distinct_outputs(resolved, &mut result);
        Self::validate_outputs_outside_sources(resolved, &mut result);

        Ok(result)
    }

    fn validate_not_empty(config: &Config, result: &mut ValidationResult) {
        let paths = &config.paths;
        let entries: [(&str, &Path); 7] = [
            ("paths.rules_dir", &paths.rules_dir),
            ("paths.rules_output", &paths.rules_output),
            ("paths.modes_dir", &paths.modes_dir),
            ("paths.modes_output", &paths.modes_output),
            ("paths.preferences_dir", &paths.preferences_dir),
            ("paths.preferences_output", &paths.preferences_output),
            ("paths.variables", &paths.variables),
        ];

        for (field, path) in entries {
            if path.as_os_str().is_empty() {
                result.add_error(ValidationError::new(field, "Path cannot be empty"));
            }
        }
    }

    fn validate_distinct_outputs(resolved: &ResolvedPaths, result: &mut ValidationResult) {
        let outputs = [
            ("paths.rules_output", &resolved.rules_output),
            ("paths.modes_output", &resolved.modes_output),
            ("paths.preferences_output", &resolved.preferences_output),
        ];

        for (i, (field, path)) in outputs.iter().enumerate() {
            for (other_field, other_path) in &outputs[i + 1..] {
                if path == other_path {
                    result.add_error(ValidationError::new(
                        *other_field,
                        format!("Output path is already used by {}", field),
                    ));
                }
            }
        }
    }

    fn validate_outputs_outside_sources(resolved: &ResolvedPaths, result: &mut ValidationResult) {
        let outputs = [
            ("paths.rules_output", &resolved.rules_output),
            ("paths.modes_output", &resolved.modes_output),
            ("paths.preferences_output", &resolved.preferences_output),
        ];
        let sources = [
            &resolved.rules_dir,
            &resolved.modes_dir,
            &resolved.preferences_dir,
        ];

        for (field, output) in outputs {
            if let Some(source) = sources.iter().find(|dir| output.starts_with(dir)) {
                result.add_warning(ValidationWarning::new(
                    field,
                    format!(
                        "Output is written inside source directory {} and may be picked up on the next run",
                        source.display()
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
