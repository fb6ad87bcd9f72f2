//! Template variables.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{error, info};

use crate::fs::FileSystem;
use crate::template::{TemplateEngine, TemplateError};

/// Values available to source templates, keyed by name.
///
/// An empty set disables templating: text passes through untouched, so
/// literal `{{` in sources survives a run without a variables file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVariables(Map<String, Value>);

impl TemplateVariables {
    pub fn new(values: Map<String, Value>) -> Self {
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Load variables from a JSON file.
    ///
    /// Never fails: no path or a missing file gives an empty set, and an
    /// unreadable or malformed file is logged and also gives an empty set.
    pub async fn load(fs: &dyn FileSystem, path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match fs.exists(path).await {
            Ok(true) => {}
            Ok(false) => {
                info!("No template variables file at {}", path.display());
                return Self::default();
            }
            Err(e) => {
                error!("Error loading template variables from {}: {}", path.display(), e);
                return Self::default();
            }
        }

        let content = match fs.read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                error!("Error loading template variables from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&content) {
            Ok(variables) => {
                info!(
                    "Loaded {} template variables from {}",
                    variables.len(),
                    path.display()
                );
                variables
            }
            Err(message) => {
                error!("Error loading template variables from {}: {}", path.display(), message);
                Self::default()
            }
        }
    }

    /// Parse a JSON document whose root is an object.
    pub fn from_json(content: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(content).map_err(|e| e.to_string())? {
            Value::Object(map) => Ok(Self(map)),
            _ => Err("expected a JSON object at the top level".to_string()),
        }
    }

    /// Render `text` when there are variables, otherwise return it as is.
    pub fn apply(&self, engine: &TemplateEngine, text: String) -> Result<String, TemplateError> {
        if self.is_empty() {
            return Ok(text);
        }
        engine.render(&text, self)
    }
}

impl From<Map<String, Value>> for TemplateVariables {
    fn from(values: Map<String, Value>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
#[path = "variables_tests.rs"]
mod tests;
