//! Loading entry points over the layered sources.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::ScaffoldConfig;
use crate::error::ScaffoldError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Builds a [`ScaffoldConfig`] from defaults and config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then the workspace files under `workspace_root`
    pub fn load(workspace_root: &Path) -> Result<ScaffoldConfig, ScaffoldError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;

        let config: ScaffoldConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), component = %config.generator.component, "Configuration loaded");
        Ok(config)
    }

    /// Defaults overridden by a single explicit file, which must exist
    pub fn load_from_file(path: &Path) -> Result<ScaffoldConfig, ScaffoldError> {
        let config = builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
