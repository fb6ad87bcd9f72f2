//! Source directory collection.
//!
//! A source directory contributes every regular `*.md` file whose name does
//! not start with `_` (drafts), sorted by file name. The order is part of
//! the output format: it fixes the order of the combined files and of the
//! mode registry.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CompileError, Result};
use crate::fs::FileSystem;

/// Extension of source documents.
pub const DOCUMENT_EXTENSION: &str = ".md";

/// File name prefix marking a draft that is left out.
pub const DRAFT_PREFIX: char = '_';

/// A source file read from a collected directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    pub path: PathBuf,
    pub content: String,
}

/// Whether a file name takes part in compilation.
pub fn is_source_file_name(name: &str) -> bool {
    name.ends_with(DOCUMENT_EXTENSION) && !name.starts_with(DRAFT_PREFIX)
}

/// Reads source directories through a [`FileSystem`].
pub struct Collector<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> Collector<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Eligible file names in `dir`, sorted.
    pub async fn list(&self, dir: &Path) -> Result<Vec<String>> {
        let entries = self.fs.read_dir(dir).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CompileError::DirectoryNotFound(dir.to_path_buf())
            } else {
                CompileError::Read {
                    path: dir.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let mut names: Vec<String> = entries
            .into_iter()
            .filter(|entry| entry.is_file && is_source_file_name(&entry.name))
            .map(|entry| entry.name)
            .collect();
        names.sort();

        Ok(names)
    }

    /// Read every eligible file in `dir`. The directory must exist.
    pub async fn collect(&self, dir: &Path) -> Result<Vec<SourceFile>> {
        let names = self.list(dir).await?;
        debug!("Collecting {} files from {}", names.len(), dir.display());

        let mut files = Vec::with_capacity(names.len());
        for file_name in names {
            let path = dir.join(&file_name);
            let content = self
                .fs
                .read_to_string(&path)
                .await
                .map_err(|source| CompileError::Read {
                    path: path.clone(),
                    source,
                })?;
            files.push(SourceFile {
                file_name,
                path,
                content,
            });
        }

        Ok(files)
    }

    /// Like [`Collector::collect`], but a missing directory yields no files.
    /// Failing to check for the directory is still an error.
    pub async fn collect_optional(&self, dir: &Path) -> Result<Vec<SourceFile>> {
        let exists = self
            .fs
            .exists(dir)
            .await
            .map_err(|source| CompileError::Read {
                path: dir.to_path_buf(),
                source,
            })?;
        if !exists {
            info!("Directory {} does not exist, skipping", dir.display());
            return Ok(Vec::new());
        }
        self.collect(dir).await
    }
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
