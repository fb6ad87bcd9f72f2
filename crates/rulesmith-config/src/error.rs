//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Configuration is invalid: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error at line {line}, column {column}: {message}")]
    TomlParse {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ConfigError {
    /// Build a single-line parse error from a `toml` error on `content`.
    pub fn toml_parse(content: &str, err: &toml::de::Error) -> Self {
        let offset = err.span().map_or(0, |span| span.start);
        let before = content.get(..offset).unwrap_or(content);
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);

        Self::TomlParse {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            message: err
                .message()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ConfigError::NotFound("rulesmith.toml".to_string());
        assert!(err.to_string().contains("rulesmith.toml"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = ConfigError::InvalidValue {
            field: "paths.rules_dir".to_string(),
            message: "must not be empty".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("paths.rules_dir"));
        assert!(display.contains("must not be empty"));
    }

    #[test]
    fn test_env_var_not_set_error() {
        let err = ConfigError::EnvVarNotSet("RULES_HOME".to_string());
        assert!(err.to_string().contains("RULES_HOME"));
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    fn test_toml_parse_error_is_single_line() {
        let content = "[paths]\nrules_dir = [unclosed";
        let toml_err = toml::from_str::<toml::Value>(content).unwrap_err();
        let err = ConfigError::toml_parse(content, &toml_err);

        assert!(matches!(err, ConfigError::TomlParse { line: 2, .. }));
        let display = err.to_string();
        assert!(display.starts_with("TOML parse error at line 2"));
        assert!(!display.contains('\n'));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().contains("denied"));
    }
}
