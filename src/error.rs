//! Error types for the scaffolding actions and generators.

use std::path::PathBuf;
use thiserror::Error;

/// Workspace store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid project directory {path}: {reason}")]
    InvalidProject { path: PathBuf, reason: String },

    #[error("Model already exists: {0}")]
    ModelExists(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Data source already exists: {0}")]
    DataSourceExists(String),

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by a generator run
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Workspace error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Dependency installation failed: {0}")]
    Install(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("Workspace not initialized. Run `load_project` or `init_workspace` first.")]
    WorkspaceNotInitialized,

    #[error("Data sources not loaded. Run `load_data_sources` first.")]
    DataSourcesNotLoaded,
}

impl From<config::ConfigError> for ScaffoldError {
    fn from(err: config::ConfigError) -> Self {
        ScaffoldError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ScaffoldError {
    fn from(err: dialoguer::Error) -> Self {
        ScaffoldError::Prompt(err.to_string())
    }
}
