//! Full compilation run.
//!
//! Steps run one after another: modes first, since the rules listing
//! needs them, then rules, then preferences. The first failure ends the
//! run; every output is a plain overwrite, so running again is the retry.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::assemble::{Compiler, ConfigResult};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::template::{RenderOptions, TemplateEngine};
use crate::variables::TemplateVariables;

/// Inputs and outputs of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub rules_dir: PathBuf,
    pub rules_output: PathBuf,
    pub modes_dir: PathBuf,
    pub modes_output: PathBuf,
    pub preferences_dir: PathBuf,
    pub preferences_output: PathBuf,
    /// Optional JSON variables file.
    pub variables: Option<PathBuf>,
    /// Base for the mode paths listed in the rules file.
    pub base_path: PathBuf,
}

/// Results of the three steps of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub modes: ConfigResult,
    pub rules: ConfigResult,
    pub preferences: ConfigResult,
}

/// Runs all assemblers in order.
pub struct Pipeline {
    fs: Arc<dyn FileSystem>,
    paths: PipelinePaths,
    options: RenderOptions,
}

impl Pipeline {
    pub fn new(fs: Arc<dyn FileSystem>, paths: PipelinePaths, options: RenderOptions) -> Self {
        Self { fs, paths, options }
    }

    /// Run modes, rules and preferences generation.
    pub async fn run(&self) -> Result<PipelineReport> {
        let paths = &self.paths;

        let variables =
            TemplateVariables::load(self.fs.as_ref(), paths.variables.as_deref()).await;
        if !variables.is_empty() {
            if let Some(path) = &paths.variables {
                info!("Using template variables from {}", path.display());
            }
        }

        let compiler = Compiler::new(
            Arc::clone(&self.fs),
            TemplateEngine::new(self.options),
            variables,
        );

        let (modes, mode_list) = compiler
            .compile_modes(&paths.modes_dir, &paths.modes_output)
            .await?;
        info!(
            "Generated {} from {} mode files",
            modes.output_path.display(),
            modes.file_count
        );

        let rules = compiler
            .compile_rules(
                &paths.rules_dir,
                &paths.rules_output,
                &mode_list,
                &paths.base_path,
            )
            .await?;
        info!(
            "Generated {} from {} rule files",
            rules.output_path.display(),
            rules.file_count
        );

        let preferences = compiler
            .compile_preferences(&paths.preferences_dir, &paths.preferences_output)
            .await?;
        info!(
            "Generated {} from {} preference files",
            preferences.output_path.display(),
            preferences.file_count
        );

        Ok(PipelineReport {
            modes,
            rules,
            preferences,
        })
    }
}
