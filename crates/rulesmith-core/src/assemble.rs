//! Output assemblers.
//!
//! Each assembler collects one source directory, renders the sources when
//! template variables are set, combines them and overwrites its output
//! file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::collector::{Collector, SourceFile};
use crate::document::ParsedDocument;
use crate::error::{CompileError, Result};
use crate::fs::FileSystem;
use crate::mode::{format_modes_for_rules, slug_from_file_name, Mode, ModeRegistry};
use crate::paths::normalize;
use crate::template::TemplateEngine;
use crate::variables::TemplateVariables;

/// Separator placed between combined source files.
pub const SEPARATOR: &str = "\n\n";

/// Outcome of one assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigResult {
    /// File that was written.
    pub output_path: PathBuf,
    /// Number of source files that went into it.
    pub file_count: usize,
}

/// Join source texts with [`SEPARATOR`].
pub fn combine(contents: &[String]) -> String {
    contents.join(SEPARATOR)
}

/// Runs the assemblers against a file system with one set of variables.
pub struct Compiler {
    fs: Arc<dyn FileSystem>,
    engine: TemplateEngine,
    variables: TemplateVariables,
}

impl Compiler {
    pub fn new(fs: Arc<dyn FileSystem>, engine: TemplateEngine, variables: TemplateVariables) -> Self {
        Self {
            fs,
            engine,
            variables,
        }
    }

    /// Build the mode registry from `modes_dir` and write it to `output`.
    ///
    /// A missing `modes_dir` gives an empty registry.
    pub async fn compile_modes(
        &self,
        modes_dir: &Path,
        output: &Path,
    ) -> Result<(ConfigResult, Vec<Mode>)> {
        info!("Generating modes from {}...", modes_dir.display());

        let files = Collector::new(self.fs.as_ref())
            .collect_optional(modes_dir)
            .await?;

        let mut modes = Vec::with_capacity(files.len());
        for file in files {
            debug!("Building mode from {}", file.path.display());
            let mut doc = ParsedDocument::parse(&file.content).map_err(|source| {
                CompileError::Document {
                    path: file.path.clone(),
                    source,
                }
            })?;
            doc.body = self.render(&file.path, doc.body)?;

            let slug = slug_from_file_name(&file.file_name).to_string();
            modes.push(Mode::build(slug, doc, normalize(&file.path)));
        }

        let registry = ModeRegistry::new(modes);
        self.write(output, &registry.to_json()?).await?;

        Ok((
            ConfigResult {
                output_path: output.to_path_buf(),
                file_count: registry.len(),
            },
            registry.modes,
        ))
    }

    /// Combine the rule files in `rules_dir`, append the mode listing and
    /// write the result to `output`.
    pub async fn compile_rules(
        &self,
        rules_dir: &Path,
        output: &Path,
        modes: &[Mode],
        base_path: &Path,
    ) -> Result<ConfigResult> {
        info!("Generating rules from {}...", rules_dir.display());

        let files = Collector::new(self.fs.as_ref()).collect(rules_dir).await?;
        let file_count = files.len();

        let mut combined = combine(&self.render_all(files)?);
        combined.push_str(&format_modes_for_rules(modes, base_path));

        self.write(output, &combined).await?;

        Ok(ConfigResult {
            output_path: output.to_path_buf(),
            file_count,
        })
    }

    /// Combine the preference files in `preferences_dir` and write the
    /// result to `output`.
    pub async fn compile_preferences(
        &self,
        preferences_dir: &Path,
        output: &Path,
    ) -> Result<ConfigResult> {
        info!("Generating preferences from {}...", preferences_dir.display());

        let files = Collector::new(self.fs.as_ref())
            .collect(preferences_dir)
            .await?;
        let file_count = files.len();

        let combined = combine(&self.render_all(files)?);
        self.write(output, &combined).await?;

        Ok(ConfigResult {
            output_path: output.to_path_buf(),
            file_count,
        })
    }

    fn render_all(&self, files: Vec<SourceFile>) -> Result<Vec<String>> {
        files
            .into_iter()
            .map(|file| {
                debug!("Adding {}", file.path.display());
                self.render(&file.path, file.content)
            })
            .collect()
    }

    fn render(&self, path: &Path, text: String) -> Result<String> {
        self.variables
            .apply(&self.engine, text)
            .map_err(|source| CompileError::Template {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.fs
            .write(path, contents)
            .await
            .map_err(|source| CompileError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
