//! Modes and the mode registry.
//!
//! Each file in the modes directory defines one mode:
//!
//! ```markdown
//! ---
//! name: Designer
//! groups: [read, edit]
//! ---
//! You design things.
//! ```
//!
//! The front matter supplies the mode fields, the file name supplies the
//! `slug` and the body becomes the `roleDefinition`.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

use crate::collector::DOCUMENT_EXTENSION;
use crate::document::{Header, ParsedDocument};
use crate::paths::relative_path;
use crate::template::{is_truthy, to_text};

/// Serialized key of the mode slug.
pub const SLUG_KEY: &str = "slug";

/// Serialized key of the role definition.
pub const ROLE_DEFINITION_KEY: &str = "roleDefinition";

/// Serialized key of the source file path.
pub const ORIGIN_PATH_KEY: &str = "__filename";

/// Heading of the mode listing appended to the rules file.
pub const MODES_HEADING: &str = "The following modes are defined in this project:";

/// A mode built from one source file.
///
/// `slug`, `role_definition` and `origin_path` are computed and take
/// precedence over front matter keys of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct Mode {
    pub slug: String,
    pub role_definition: String,
    pub origin_path: PathBuf,
    /// Front matter fields in declaration order.
    pub fields: Header,
}

impl Mode {
    /// Build a mode from a parsed (and already rendered) document.
    pub fn build(slug: impl Into<String>, doc: ParsedDocument, origin_path: impl Into<PathBuf>) -> Self {
        let slug = slug.into();
        let origin_path = origin_path.into();

        for key in [SLUG_KEY, ROLE_DEFINITION_KEY, ORIGIN_PATH_KEY] {
            if doc.header.contains_key(key) {
                warn!(
                    "Front matter key '{}' in {} is overridden by the computed value",
                    key,
                    origin_path.display()
                );
            }
        }

        Self {
            slug,
            role_definition: doc.body,
            origin_path,
            fields: doc.header,
        }
    }

    /// Display name from the `name` field; empty when it is missing or
    /// not set. Non-string values use their text form.
    pub fn name(&self) -> Cow<'_, str> {
        self.fields
            .get("name")
            .filter(|value| is_truthy(value))
            .map(to_text)
            .unwrap_or_default()
    }

    /// Tool groups from the `groups` field.
    pub fn groups(&self) -> &[Value] {
        self.fields
            .get("groups")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Origin marker from the `source` field.
    pub fn source(&self) -> Option<&str> {
        self.fields.get("source").and_then(Value::as_str)
    }

    /// The mode as a JSON object.
    ///
    /// Front matter keys keep their order. The computed keys replace
    /// same-named front matter values in place and are otherwise appended
    /// as `slug`, `roleDefinition`, `__filename`.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = self.fields.clone();
        record.insert(SLUG_KEY.to_string(), Value::String(self.slug.clone()));
        record.insert(
            ROLE_DEFINITION_KEY.to_string(),
            Value::String(self.role_definition.clone()),
        );
        record.insert(
            ORIGIN_PATH_KEY.to_string(),
            Value::String(self.origin_path.to_string_lossy().into_owned()),
        );
        record
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Slug of a mode source file: its name without the `.md` extension.
pub fn slug_from_file_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(DOCUMENT_EXTENSION)
        .unwrap_or(file_name)
}

/// All modes of a run, in source file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeRegistry {
    #[serde(rename = "customModes")]
    pub modes: Vec<Mode>,
}

impl ModeRegistry {
    /// Wrap `modes` without reordering them.
    pub fn new(modes: Vec<Mode>) -> Self {
        Self { modes }
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Listing of `modes` for the end of the rules file.
///
/// Empty when there are no modes. Otherwise a blank line, a heading and
/// one `- <slug> <name> at <path>` line per mode, with paths relative to
/// `base`.
pub fn format_modes_for_rules(modes: &[Mode], base: &Path) -> String {
    if modes.is_empty() {
        return String::new();
    }

    let mut output = format!("\n\n{MODES_HEADING}");
    for mode in modes {
        output.push_str(&format!(
            "\n- {} {} at {}",
            mode.slug,
            mode.name(),
            relative_path(base, &mode.origin_path)
        ));
    }
    output
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
