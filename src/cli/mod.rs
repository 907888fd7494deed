pub mod commands;
pub mod utils;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::config;
use crate::tools::ToolRegistry;

#[derive(Parser)]
#[command(name = "utm")]
#[command(about = "UTM builder - turn CSV rows into validated campaign tracking links")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Tool file (.yaml, .yml or .json); built-in Google Analytics when omitted")]
    pub tools: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Build links for every row of a CSV file")]
    Build(commands::build::BuildArgs),

    #[command(about = "Build a single link from command-line values")]
    Link(commands::link::LinkArgs),

    #[command(about = "List configured tools, their fields and rules")]
    Tools,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Tools from `path`, or the built-in registry
pub fn load_registry(path: Option<&Path>) -> anyhow::Result<ToolRegistry> {
    let app = config();
    let registry = match path {
        Some(path) => ToolRegistry::from_file(path, &app.builder, app.logging.log_rows)
            .map_err(crate::error::AppError::from)?,
        None => ToolRegistry::builtin(&app.builder, app.logging.log_rows),
    };
    Ok(registry)
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let registry = load_registry(cli.tools.as_deref())?;

    match cli.command {
        Commands::Build(args) => commands::build::handle(args, &registry, output_format),
        Commands::Link(args) => commands::link::handle(args, &registry, output_format),
        Commands::Tools => commands::tools::handle(&registry, output_format),
    }
}
