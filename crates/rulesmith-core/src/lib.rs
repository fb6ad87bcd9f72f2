//! # rulesmith Core
//!
//! Turns directories of Markdown fragments into the configuration files an
//! AI-assistant toolchain reads:
//!
//! - **Rules**: rule fragments joined into one file, followed by a listing
//!   of the generated modes
//! - **Modes**: one mode per file (YAML front matter + role definition),
//!   written as a `{ "customModes": [...] }` JSON registry
//! - **Preferences**: preference fragments joined into one file
//!
//! Every source may use Mustache placeholders filled from an optional
//! JSON variables file.

pub mod assemble;
pub mod collector;
pub mod document;
pub mod error;
pub mod fs;
pub mod mode;
pub mod paths;
pub mod pipeline;
pub mod template;
pub mod variables;

pub use assemble::{Compiler, ConfigResult};
pub use collector::{Collector, SourceFile};
pub use document::{DocumentError, Header, ParsedDocument};
pub use error::{CompileError, Result};
pub use fs::{FileSystem, LocalFileSystem};
pub use mode::{Mode, ModeRegistry};
pub use pipeline::{Pipeline, PipelinePaths, PipelineReport};
pub use template::{RenderOptions, TemplateEngine, TemplateError};
pub use variables::TemplateVariables;
