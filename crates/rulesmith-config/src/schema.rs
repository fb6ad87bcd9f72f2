//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Source directories and generated files.
///
/// Relative paths are resolved against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding rule fragments.
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,

    /// Combined rules file.
    #[serde(default = "default_rules_output")]
    pub rules_output: PathBuf,

    /// Directory holding one Markdown file per mode.
    #[serde(default = "default_modes_dir")]
    pub modes_dir: PathBuf,

    /// JSON mode registry.
    #[serde(default = "default_modes_output")]
    pub modes_output: PathBuf,

    /// Directory holding preference fragments.
    #[serde(default = "default_preferences_dir")]
    pub preferences_dir: PathBuf,

    /// Combined preferences file.
    #[serde(default = "default_preferences_output")]
    pub preferences_output: PathBuf,

    /// JSON file with template variables.
    #[serde(default = "default_variables")]
    pub variables: PathBuf,

    /// Base for the mode paths listed in the rules file. Defaults to the
    /// working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            rules_dir: default_rules_dir(),
            rules_output: default_rules_output(),
            modes_dir: default_modes_dir(),
            modes_output: default_modes_output(),
            preferences_dir: default_preferences_dir(),
            preferences_output: default_preferences_output(),
            variables: default_variables(),
            base_path: None,
        }
    }
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("../.cline/rules")
}

fn default_rules_output() -> PathBuf {
    PathBuf::from("../.clinerules")
}

fn default_modes_dir() -> PathBuf {
    PathBuf::from("../.cline/roomodes")
}

fn default_modes_output() -> PathBuf {
    PathBuf::from("../.roomodes")
}

fn default_preferences_dir() -> PathBuf {
    PathBuf::from("../.claude")
}

fn default_preferences_output() -> PathBuf {
    PathBuf::from("../.claude_preferences")
}

fn default_variables() -> PathBuf {
    PathBuf::from("../variables.json")
}

/// Template rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Load the variables file and render sources as templates.
    #[serde(default = "default_use_variables")]
    pub use_variables: bool,

    /// HTML-escape substituted values.
    #[serde(default)]
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_variables: default_use_variables(),
            escape_html: false,
        }
    }
}

fn default_use_variables() -> bool {
    true
}

/// Paths after tilde expansion, resolution against a working directory and
/// lexical normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub rules_dir: PathBuf,
    pub rules_output: PathBuf,
    pub modes_dir: PathBuf,
    pub modes_output: PathBuf,
    pub preferences_dir: PathBuf,
    pub preferences_output: PathBuf,
    pub variables: Option<PathBuf>,
    pub base_path: PathBuf,
}

impl PathsConfig {
    /// Resolve every path against `work_dir`, dropping `.` and `..`
    /// components.
    ///
    /// `variables` is `None` when `use_variables` is off.
    pub fn resolve(&self, work_dir: &Path, use_variables: bool) -> ResolvedPaths {
        let resolve = |path: &Path| -> PathBuf {
            let expanded = PathBuf::from(ConfigLoader::expand_path(&path.to_string_lossy()));
            normalize(&work_dir.join(expanded))
        };

        ResolvedPaths {
            rules_dir: resolve(&self.rules_dir),
            rules_output: resolve(&self.rules_output),
            modes_dir: resolve(&self.modes_dir),
            modes_output: resolve(&self.modes_output),
            preferences_dir: resolve(&self.preferences_dir),
            preferences_output: resolve(&self.preferences_output),
            variables: use_variables.then(|| resolve(&self.variables)),
            base_path: self
                .base_path
                .as_deref()
                .map(resolve)
                .unwrap_or_else(|| normalize(work_dir)),
        }
    }
}

/// Resolve `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
