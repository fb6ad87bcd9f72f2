//! File-system boundary.
//!
//! The compiler reads source directories and writes generated files only
//! through [`FileSystem`], so the I/O layer stays swappable.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name, lossily converted to UTF-8.
    pub name: String,
    /// Full path of the entry.
    pub path: PathBuf,
    /// Regular file (not a directory, not a symlink).
    pub is_file: bool,
}

/// File operations used by the compiler.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// List the entries of `dir`, in no particular order.
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a UTF-8 file.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path` and write `contents`.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Whether `path` exists. Errors other than "not found" (such as a
    /// permission error on a parent directory) are returned.
    async fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn read_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = reader.next_entry().await? {
            let file_type = entry.file_type().await?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_file: file_type.is_file(),
            });
        }

        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }
}
