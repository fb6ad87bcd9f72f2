//! Front matter parsing.
//!
//! A source document may start with a YAML block fenced by `---` lines:
//!
//! ```markdown
//! ---
//! name: Designer
//! groups: [read, edit]
//! ---
//! You design things.
//! ```
//!
//! Front matter is optional. Text without a complete leading block is all
//! body. A block that is present but is not valid YAML is an error.

use serde_json::{Map, Value};
use thiserror::Error;

/// Line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// Key-value data from a front matter block, in declaration order.
pub type Header = Map<String, Value>;

/// Errors raised while parsing or writing front matter.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The block is not valid YAML.
    #[error("Failed to parse YAML front matter: {0}")]
    Yaml(String),

    /// The block is valid YAML but not a key-value mapping.
    #[error("Front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    /// The header could not be written back as YAML.
    #[error("Failed to serialize YAML front matter: {0}")]
    YamlSerialize(String),
}

/// A source document split into its front matter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Front matter fields. Empty when the document has no header block.
    pub header: Header,

    /// Everything after the closing delimiter line, or the whole text.
    pub body: String,
}

impl ParsedDocument {
    /// Parse raw document text.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let Some((yaml, body)) = split_front_matter(raw) else {
            return Ok(Self {
                header: Header::new(),
                body: raw.to_string(),
            });
        };

        Ok(Self {
            header: parse_header(yaml)?,
            body: body.to_string(),
        })
    }

    /// Write the document back out with its front matter block.
    pub fn to_markdown(&self) -> Result<String, DocumentError> {
        if self.header.is_empty() {
            return Ok(self.body.clone());
        }

        let yaml = serde_yml::to_string(&self.header)
            .map_err(|e| DocumentError::YamlSerialize(e.to_string()))?;

        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", self.body))
    }
}

/// Split `raw` into the header block and the body that follows it.
///
/// Returns `None` unless the text opens with a delimiter line and a later
/// delimiter line closes a non-empty block.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw
        .strip_prefix("---\n")
        .or_else(|| raw.strip_prefix("---\r\n"))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let block = &rest[..offset];
        if trim_line_break(line) == DELIMITER && !trim_line_break(block).is_empty() {
            return Some((block, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn trim_line_break(text: &str) -> &str {
    text.strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(text)
}

fn parse_header(yaml: &str) -> Result<Header, DocumentError> {
    let blank = yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Header::new());
    }

    let value: Value =
        serde_yml::from_str(yaml).map_err(|e| DocumentError::Yaml(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Header::new()),
        Value::Bool(_) => Err(DocumentError::NotAMapping("a boolean")),
        Value::Number(_) => Err(DocumentError::NotAMapping("a number")),
        Value::String(_) => Err(DocumentError::NotAMapping("a string")),
        Value::Array(_) => Err(DocumentError::NotAMapping("a sequence")),
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
