//! Template rendering.
//!
//! Sources are Mustache templates: `{{name}}` substitution with dotted
//! paths (`{{project.name}}`), sections (`{{#list}}...{{/list}}`) that
//! iterate sequences, enter objects and test other values, inverted
//! sections (`{{^flag}}...{{/flag}}`), the implicit iterator `{{.}}`,
//! raw tags (`{{{name}}}`, `{{&name}}`), comments and delimiter changes.
//! Missing variables render as nothing.
//!
//! Output is Markdown, so substituted values are inserted verbatim unless
//! [`RenderOptions::escape_html`] asks otherwise. The setting belongs to a
//! [`TemplateEngine`] instance; nothing is configured process-wide.

mod parser;
mod value;

use serde_json::Value;
use thiserror::Error;

use crate::variables::TemplateVariables;
use parser::Node;

pub use value::{is_truthy, to_text};

/// A source is not a well-formed template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed tag at line {line}, column {column}")]
    UnclosedTag { line: usize, column: usize },

    #[error("unclosed section \"{name}\" at line {line}, column {column}")]
    UnclosedSection {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("unopened section \"{name}\" at line {line}, column {column}")]
    UnopenedSection {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("invalid delimiters \"{tags}\" at line {line}, column {column}")]
    InvalidDelimiters {
        tags: String,
        line: usize,
        column: usize,
    },
}

impl TemplateError {
    fn unclosed_tag(source: &str, offset: usize) -> Self {
        let (line, column) = location(source, offset);
        Self::UnclosedTag { line, column }
    }

    fn unclosed_section(source: &str, offset: usize, name: String) -> Self {
        let (line, column) = location(source, offset);
        Self::UnclosedSection { name, line, column }
    }

    fn unopened_section(source: &str, offset: usize, name: String) -> Self {
        let (line, column) = location(source, offset);
        Self::UnopenedSection { name, line, column }
    }

    fn invalid_delimiters(source: &str, offset: usize, tags: &str) -> Self {
        let (line, column) = location(source, offset);
        Self::InvalidDelimiters {
            tags: tags.to_string(),
            line,
            column,
        }
    }
}

/// 1-based line and column of a byte offset.
fn location(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

/// Per-engine rendering settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// HTML-escape values inserted by `{{name}}` tags.
    pub escape_html: bool,
}

impl RenderOptions {
    /// Enable or disable HTML escaping.
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }
}

/// Renders source text against template variables.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    options: RenderOptions,
}

impl TemplateEngine {
    /// Create an engine with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options this engine was built with.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render `text` against `variables`.
    pub fn render(&self, text: &str, variables: &TemplateVariables) -> Result<String, TemplateError> {
        let nodes = parser::parse(text)?;
        let root = Value::Object(variables.as_map().clone());

        let mut output = String::with_capacity(text.len());
        self.render_nodes(&nodes, &mut vec![&root], &mut output);
        Ok(output)
    }

    fn render_nodes<'v>(&self, nodes: &[Node], scopes: &mut Vec<&'v Value>, output: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Variable { name, escape } => {
                    let Some(value) = value::lookup(scopes, name) else {
                        continue;
                    };
                    let text = to_text(value);
                    if *escape && self.options.escape_html && !value.is_number() {
                        escape_html_into(&text, output);
                    } else {
                        output.push_str(&text);
                    }
                }
                Node::Section {
                    name,
                    inverted: false,
                    children,
                } => {
                    let Some(value) = value::lookup(scopes, name).filter(|v| is_truthy(v)) else {
                        continue;
                    };
                    match value {
                        Value::Array(items) => {
                            for item in items {
                                self.render_scoped(children, scopes, item, output);
                            }
                        }
                        Value::Bool(true) => self.render_nodes(children, scopes, output),
                        other => self.render_scoped(children, scopes, other, output),
                    }
                }
                Node::Section {
                    name,
                    inverted: true,
                    children,
                } => {
                    let skip = match value::lookup(scopes, name) {
                        Some(Value::Array(items)) => !items.is_empty(),
                        Some(value) => is_truthy(value),
                        None => false,
                    };
                    if !skip {
                        self.render_nodes(children, scopes, output);
                    }
                }
            }
        }
    }

    fn render_scoped<'v>(
        &self,
        nodes: &[Node],
        scopes: &mut Vec<&'v Value>,
        scope: &'v Value,
        output: &mut String,
    ) {
        scopes.push(scope);
        self.render_nodes(nodes, scopes, output);
        scopes.pop();
    }
}

fn escape_html_into(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            '/' => output.push_str("&#x2F;"),
            '`' => output.push_str("&#x60;"),
            '=' => output.push_str("&#x3D;"),
            _ => output.push(c),
        }
    }
}

/// Render `text` with a default (non-escaping) engine.
pub fn render(text: &str, variables: &TemplateVariables) -> Result<String, TemplateError> {
    TemplateEngine::default().render(text, variables)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
