//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, or the defaults if it is absent.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)
            .map_err(|e| ConfigError::toml_parse(&expanded, &e))?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.config`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.paths.rules_dir, PathBuf::from("../.cline/rules"));
        assert!(config.render.use_variables);
    }

    #[test]
    fn test_load_paths_section() {
        let content = r#"
            [paths]
            rules_dir = "prompts/rules"
            modes_output = "out/modes.json"
            base_path = "/repo"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.paths.rules_dir, PathBuf::from("prompts/rules"));
        assert_eq!(config.paths.modes_output, PathBuf::from("out/modes.json"));
        assert_eq!(config.paths.base_path, Some(PathBuf::from("/repo")));
        // Untouched keys keep their defaults.
        assert_eq!(config.paths.modes_dir, PathBuf::from("../.cline/roomodes"));
    }

    #[test]
    fn test_load_render_section() {
        let content = r#"
            [render]
            use_variables = false
            escape_html = true
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.render.use_variables);
        assert!(config.render.escape_html);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[paths]").unwrap();
        writeln!(file, "rules_output = \"RULES.md\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.paths.rules_output, PathBuf::from("RULES.md"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/rulesmith.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_nonexistent_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/rulesmith.toml")).unwrap();
        assert_eq!(config.paths.rules_output, PathBuf::from("../.clinerules"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse { line: 1, .. })));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("RULESMITH_TEST_CONFIG_VAR", "prompts");
        }
        let content = "rules_dir = \"${RULESMITH_TEST_CONFIG_VAR}/rules\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, "rules_dir = \"prompts/rules\"");
        unsafe {
            std::env::remove_var("RULESMITH_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${RULESMITH_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/share/rules";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/rules");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/rules"));
    }
}
