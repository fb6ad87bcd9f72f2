//! CLI definitions for rulesmith.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rulesmith CLI.
#[derive(Parser)]
#[command(name = "rulesmith")]
#[command(about = "Compile Markdown rules, modes and preferences into assistant configuration files")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: rulesmith.toml, optional)
    #[arg(short, long, env = "RULESMITH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Working directory
    #[arg(short, long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// Template variables file (overrides the configuration)
    #[arg(long, global = true, conflicts_with = "no_variables")]
    pub variables: Option<PathBuf>,

    /// Skip template rendering entirely
    #[arg(long, global = true)]
    pub no_variables: bool,

    /// HTML-escape substituted template values
    #[arg(long, global = true)]
    pub escape_html: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate modes, rules and preferences (default)
    Build,

    /// Validate the configuration and show the resolved paths
    Check,
}

/// Default configuration file, looked up in the working directory.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "rulesmith.toml";
