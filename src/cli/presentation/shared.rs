//! Validate and config output.

use crate::config::ScaffoldConfig;
use crate::error::ScaffoldError;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn format_validate_result(workspace: &Path, component: &str) -> String {
    format!(
        "{} {} is a valid project (component '{}')",
        "✓".green(),
        workspace.display().bold(),
        component
    )
}

pub fn format_config_toml(config: &ScaffoldConfig) -> Result<String, ScaffoldError> {
    toml::to_string_pretty(config)
        .map_err(|e| ScaffoldError::ConfigError(format!("Failed to render configuration: {}", e)))
}
