//! Workspace config file source: .scaffold/config.toml and .scaffold/{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Selects the environment-specific overlay file
pub const ENV_VAR: &str = "SCAFFOLD_ENV";

pub fn workspace_config_dir(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".scaffold")
}

/// Add workspace config files to builder.
/// Precedence: .scaffold/config.toml (base) then .scaffold/{SCAFFOLD_ENV}.toml.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = workspace_config_dir(workspace_root);
    let env_name = std::env::var(ENV_VAR).unwrap_or_else(|_| "development".to_string());

    let mut builder = builder;

    let base_config_path = config_dir.join("config.toml");
    if base_config_path.exists() {
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    let env_config_path = config_dir.join(format!("{}.toml", env_name));
    if env_config_path.exists() {
        builder = builder.add_source(File::from(env_config_path).required(false));
    }

    Ok(builder)
}
