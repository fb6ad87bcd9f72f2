//! Mustache template parser.
//!
//! Produces a tree of [`Node`]s. A line holding only section, comment,
//! partial or delimiter tags (plus whitespace) is "standalone": the whole
//! line, newline included, is dropped from the output.

use super::TemplateError;

const DEFAULT_TAGS: (&str, &str) = ("{{", "}}");

/// A parsed template element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    /// `{{name}}` (escaped) or `{{{name}}}` / `{{&name}}` (raw).
    Variable { name: String, escape: bool },
    /// `{{#name}}...{{/name}}`, or `{{^name}}...{{/name}}` when inverted.
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

/// Flat token before sections are nested. `None` marks stripped
/// whitespace.
#[derive(Debug)]
enum Token {
    Text(String),
    Variable { name: String, escape: bool },
    Open { name: String, inverted: bool, offset: usize },
    Close { name: String, offset: usize },
}

/// Parse `source` into a node tree.
pub(crate) fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    let tokens = Scanner::new(source).scan()?;
    nest(source, tokens)
}

struct Scanner<'a> {
    source: &'a str,
    open: String,
    close: String,
    tokens: Vec<Option<Token>>,
    /// Indices of whitespace-only text tokens on the current line.
    spaces: Vec<usize>,
    has_tag: bool,
    non_space: bool,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            open: DEFAULT_TAGS.0.to_string(),
            close: DEFAULT_TAGS.1.to_string(),
            tokens: Vec::new(),
            spaces: Vec::new(),
            has_tag: false,
            non_space: false,
        }
    }

    fn scan(mut self) -> Result<Vec<Option<Token>>, TemplateError> {
        let source = self.source;
        let mut pos = 0;

        while pos < source.len() {
            let Some(found) = source[pos..].find(self.open.as_str()) else {
                self.push_text(&source[pos..]);
                break;
            };
            let tag_start = pos + found;
            self.push_text(&source[pos..tag_start]);
            pos = self.scan_tag(tag_start)?;
        }

        self.strip_space();
        Ok(self.tokens)
    }

    /// Scan the tag opening at `tag_start`; returns the offset after it.
    fn scan_tag(&mut self, tag_start: usize) -> Result<usize, TemplateError> {
        let source = self.source;
        let unclosed = || TemplateError::unclosed_tag(source, tag_start);

        let mut cursor = tag_start + self.open.len();
        let kind = match source[cursor..].chars().next() {
            Some(c @ ('#' | '^' | '/' | '>' | '{' | '&' | '=' | '!')) => {
                cursor += 1;
                c
            }
            _ => ' ',
        };
        cursor += leading_whitespace(&source[cursor..]);

        let value = match kind {
            '=' => {
                let equals = source[cursor..].find('=').ok_or_else(unclosed)?;
                let value = source[cursor..cursor + equals].trim_end();
                cursor += equals + 1;
                let end = source[cursor..].find(self.close.as_str()).ok_or_else(unclosed)?;
                cursor += end + self.close.len();
                value
            }
            '{' => {
                let closing = format!("}}{}", self.close);
                let end = source[cursor..].find(closing.as_str()).ok_or_else(unclosed)?;
                let value = source[cursor..cursor + end].trim_end();
                cursor += end + closing.len();
                value
            }
            _ => {
                let end = source[cursor..].find(self.close.as_str()).ok_or_else(unclosed)?;
                let value = source[cursor..cursor + end].trim_end();
                cursor += end + self.close.len();
                value
            }
        };

        self.has_tag = true;
        let name = value.to_string();
        match kind {
            '#' | '^' => self.push(Token::Open {
                name,
                inverted: kind == '^',
                offset: tag_start,
            }),
            '/' => self.push(Token::Close {
                name,
                offset: tag_start,
            }),
            '{' | '&' => {
                self.non_space = true;
                self.push(Token::Variable {
                    name,
                    escape: false,
                });
            }
            '=' => self.set_delimiters(value, tag_start)?,
            // Comments render nothing; no partials are registered.
            '!' | '>' => {}
            _ => {
                self.non_space = true;
                self.push(Token::Variable { name, escape: true });
            }
        }

        Ok(cursor)
    }

    fn set_delimiters(&mut self, value: &str, offset: usize) -> Result<(), TemplateError> {
        let tags: Vec<&str> = value.split_whitespace().collect();
        match tags.as_slice() {
            [open, close] => {
                self.open = (*open).to_string();
                self.close = (*close).to_string();
                Ok(())
            }
            _ => Err(TemplateError::invalid_delimiters(self.source, offset, value)),
        }
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(Some(token));
    }

    /// Push text as whitespace and non-whitespace runs, ending a line at
    /// every newline.
    fn push_text(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            let mut start = 0;
            let mut run_is_space = None;

            for (index, c) in line.char_indices() {
                let is_space = c.is_whitespace();
                if let Some(previous) = run_is_space {
                    if previous != is_space {
                        self.push_run(&line[start..index], previous);
                        start = index;
                    }
                }
                run_is_space = Some(is_space);
            }
            if let Some(is_space) = run_is_space {
                self.push_run(&line[start..], is_space);
            }

            if line.ends_with('\n') {
                self.strip_space();
            }
        }
    }

    fn push_run(&mut self, run: &str, is_space: bool) {
        if is_space {
            self.spaces.push(self.tokens.len());
        } else {
            self.non_space = true;
        }
        self.push(Token::Text(run.to_string()));
    }

    /// End of line: drop its whitespace if it only held standalone tags.
    fn strip_space(&mut self) {
        if self.has_tag && !self.non_space {
            for index in self.spaces.drain(..) {
                self.tokens[index] = None;
            }
        } else {
            self.spaces.clear();
        }
        self.has_tag = false;
        self.non_space = false;
    }
}

fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

struct OpenSection {
    name: String,
    inverted: bool,
    offset: usize,
    children: Vec<Node>,
}

fn nest(source: &str, tokens: Vec<Option<Token>>) -> Result<Vec<Node>, TemplateError> {
    let mut root = Vec::new();
    let mut open: Vec<OpenSection> = Vec::new();

    for token in tokens.into_iter().flatten() {
        match token {
            Token::Text(text) => {
                let nodes = current(&mut root, &mut open);
                match nodes.last_mut() {
                    Some(Node::Text(previous)) => previous.push_str(&text),
                    _ => nodes.push(Node::Text(text)),
                }
            }
            Token::Variable { name, escape } => {
                current(&mut root, &mut open).push(Node::Variable { name, escape });
            }
            Token::Open {
                name,
                inverted,
                offset,
            } => open.push(OpenSection {
                name,
                inverted,
                offset,
                children: Vec::new(),
            }),
            Token::Close { name, offset } => {
                let Some(section) = open.pop() else {
                    return Err(TemplateError::unopened_section(source, offset, name));
                };
                if section.name != name {
                    return Err(TemplateError::unclosed_section(source, offset, section.name));
                }
                current(&mut root, &mut open).push(Node::Section {
                    name: section.name,
                    inverted: section.inverted,
                    children: section.children,
                });
            }
        }
    }

    match open.pop() {
        Some(section) => Err(TemplateError::unclosed_section(
            source,
            section.offset,
            section.name,
        )),
        None => Ok(root),
    }
}

fn current<'n>(root: &'n mut Vec<Node>, open: &'n mut [OpenSection]) -> &'n mut Vec<Node> {
    match open.last_mut() {
        Some(section) => &mut section.children,
        None => root,
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
