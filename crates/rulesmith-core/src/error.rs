//! Compilation errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentError;
use crate::template::TemplateError;

/// Errors that abort a compilation run.
///
/// Missing or malformed optional inputs (the modes directory, the
/// variables file) are recovered where they are read and never show up
/// here.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A required source directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Reading a directory or source file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a generated file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file has a front matter block that cannot be parsed.
    #[error("Invalid front matter in {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// A source file is not a valid template.
    #[error("Failed to render {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },

    /// The mode registry could not be serialized.
    #[error("Failed to serialize mode registry: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
