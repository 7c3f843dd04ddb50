//! CLI parse: clap types for scaffold. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scaffold CLI - generate projects, models, properties and data sources
#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(about = "Interactive project and model generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Do not run the package manager after generating files
    #[arg(long)]
    pub skip_install: bool,

    /// Run as a sub-generator of an existing project
    #[arg(long, requires = "project_dir")]
    pub nested: bool,

    /// Existing project directory used with --nested
    #[arg(long)]
    pub project_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a new application
    App {
        /// Application name (prompted when omitted)
        name: Option<String>,
    },
    /// Add a model to the project
    Model {
        /// Model name (prompted when omitted)
        name: Option<String>,
    },
    /// Add properties to an existing model
    Property {
        /// Model receiving the properties
        model: String,
    },
    /// Add a data source to the project
    Datasource {
        /// Data source name (prompted when omitted)
        name: Option<String>,
    },
    /// List the project's models
    Models {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the project's data sources
    Datasources {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Check that the workspace is a valid project
    Validate,
    /// Print the effective configuration as TOML
    Config,
}
