//! rulesmith - assistant configuration compiler
//!
//! Main entry point for the rulesmith CLI.

mod cli;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rulesmith_config::{Config, ConfigLoader, ConfigValidator, ResolvedPaths};
use rulesmith_core::{LocalFileSystem, Pipeline, PipelinePaths, RenderOptions};

use cli::{Cli, Commands, DEFAULT_CONFIG_FILE};

/// Initialize console tracing. `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", single_line(&e.to_string()));
        std::process::exit(1);
    }
}

/// Collapse a possibly multi-line error message onto one line.
fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let work_dir = match &cli.work_dir {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir()?,
    };

    let config = load_config(&cli, &work_dir)?;
    let resolved = config
        .paths
        .resolve(&work_dir, config.render.use_variables);

    let validation = ConfigValidator::validate(&config, &resolved)?;
    for warning in validation.into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => build(&config, resolved).await,
        Commands::Check => {
            print_paths(&resolved);
            Ok(())
        }
    }
}

/// Load the configuration file and apply command-line overrides.
fn load_config(cli: &Cli, work_dir: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load(&work_dir.join(path))?,
        None => ConfigLoader::load_or_default(&work_dir.join(DEFAULT_CONFIG_FILE))?,
    };

    if let Some(variables) = &cli.variables {
        config.paths.variables = variables.clone();
    }
    if cli.no_variables {
        config.render.use_variables = false;
    }
    if cli.escape_html {
        config.render.escape_html = true;
    }

    Ok(config)
}

async fn build(config: &Config, resolved: ResolvedPaths) -> Result<(), Box<dyn std::error::Error>> {
    let options = RenderOptions::default().with_escape_html(config.render.escape_html);
    let pipeline = Pipeline::new(Arc::new(LocalFileSystem), pipeline_paths(resolved), options);
    pipeline.run().await?;

    Ok(())
}

fn pipeline_paths(resolved: ResolvedPaths) -> PipelinePaths {
    PipelinePaths {
        rules_dir: resolved.rules_dir,
        rules_output: resolved.rules_output,
        modes_dir: resolved.modes_dir,
        modes_output: resolved.modes_output,
        preferences_dir: resolved.preferences_dir,
        preferences_output: resolved.preferences_output,
        variables: resolved.variables,
        base_path: resolved.base_path,
    }
}

fn print_paths(resolved: &ResolvedPaths) {
    let variables = resolved
        .variables
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(disabled)".to_string());
    let rows: [(&str, String); 8] = [
        ("Modes", display(&resolved.modes_dir)),
        ("Modes output", display(&resolved.modes_output)),
        ("Rules", display(&resolved.rules_dir)),
        ("Rules output", display(&resolved.rules_output)),
        ("Preferences", display(&resolved.preferences_dir)),
        ("Preferences output", display(&resolved.preferences_output)),
        ("Variables", variables),
        ("Base path", display(&resolved.base_path)),
    ];

    println!("Configuration OK");
    println!("{}", "=".repeat(50));
    for (label, value) in rows {
        println!("{:<20} {}", label, value);
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
