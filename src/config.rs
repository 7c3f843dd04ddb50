//! Configuration System
//!
//! Layered configuration for generator runs: built-in defaults, the user's global
//! file, then the workspace's `.scaffold/` files. Logging settings live here too so
//! a single file drives both.

use crate::logging::LoggingConfig;
use crate::workspace::DEFAULT_COMPONENT;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::{workspace_config_dir, ENV_VAR as SCAFFOLD_ENV_VAR};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["text", "json"];
const LOG_OUTPUTS: &[&str] = &["stdout", "stderr", "file", "file+stderr"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    #[serde(default)]
    pub generator: GeneratorSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings shared by every generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Subdirectory holding `models.json` and `datasources.json`
    #[serde(default = "default_component")]
    pub component: String,

    /// Program invoked as `<package_manager> install`
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    #[serde(default)]
    pub skip_install: bool,
}

fn default_component() -> String {
    DEFAULT_COMPONENT.to_string()
}

fn default_package_manager() -> String {
    "npm".to_string()
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            component: default_component(),
            package_manager: default_package_manager(),
            skip_install: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Generator(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generator(msg) => write!(f, "Generator: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), String> {
        let component = self.component.trim();
        if component.is_empty() {
            return Err("Component cannot be empty".to_string());
        }
        if component.contains(['/', '\\']) || component == "." || component == ".." {
            return Err(format!(
                "Component '{}' must be a single directory name",
                self.component
            ));
        }
        if self.package_manager.trim().is_empty() {
            return Err("Package manager cannot be empty".to_string());
        }
        Ok(())
    }
}

fn validate_logging(logging: &LoggingConfig) -> Vec<String> {
    let mut problems = Vec::new();
    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        problems.push(format!("Unknown level '{}'", logging.level));
    }
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        problems.push(format!("Unknown format '{}'", logging.format));
    }
    if !LOG_OUTPUTS.contains(&logging.output.as_str()) {
        problems.push(format!("Unknown output '{}'", logging.output));
    }
    problems
}

impl ScaffoldConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generator.validate() {
            errors.push(ValidationError::Generator(e));
        }
        errors.extend(
            validate_logging(&self.logging)
                .into_iter()
                .map(ValidationError::Logging),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
