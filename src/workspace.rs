//! Workspace store
//!
//! Query and persistence port for the model and data-source definitions of a
//! project. Generators only talk to the store through [`WorkspaceStore`]; the
//! location it resolves against is passed in explicitly as a [`WorkspaceConfig`].

mod json_store;
mod types;

pub use json_store::{JsonStoreFactory, JsonWorkspaceStore, BUILTIN_MODELS};
pub use types::{
    DataSourceDefinition, ModelConfig, ModelDefinition, PropertyDefinition, PropertyType,
};

use crate::error::StoreError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default component directory holding the model registry and data sources
pub const DEFAULT_COMPONENT: &str = "rest";

/// Location the store resolves every query against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub workspace_dir: PathBuf,
    pub component: String,
}

impl WorkspaceConfig {
    pub fn new(workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            workspace_dir: workspace_dir.into(),
            component: DEFAULT_COMPONENT.to_string(),
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Directory of the registry component, e.g. `<workspace>/rest`
    pub fn component_dir(&self) -> PathBuf {
        self.workspace_dir.join(&self.component)
    }
}

/// Workspace store interface
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Directory this store was opened against
    fn workspace_dir(&self) -> &Path;

    /// Check that the workspace directory holds a recognizable project
    async fn is_valid_dir(&self) -> Result<(), StoreError>;

    /// All model definitions, in registry order
    async fn find_models(&self) -> Result<Vec<ModelDefinition>, StoreError>;

    /// All data source definitions, in file order
    async fn find_data_sources(&self) -> Result<Vec<DataSourceDefinition>, StoreError>;

    /// Write a fresh project skeleton. Returns the files written, relative to the workspace.
    async fn create_project(&self, name: &str) -> Result<Vec<PathBuf>, StoreError>;

    /// Write `models/<name>.json` and register the model. Returns the definition path.
    async fn create_model(
        &self,
        definition: &ModelDefinition,
        config: &ModelConfig,
    ) -> Result<PathBuf, StoreError>;

    async fn add_property(
        &self,
        model: &str,
        property: &str,
        definition: &PropertyDefinition,
    ) -> Result<(), StoreError>;

    async fn create_data_source(&self, definition: &DataSourceDefinition)
        -> Result<(), StoreError>;

    /// Persist pending mutations
    async fn flush(&self) -> Result<(), StoreError>;
}

/// Opens a store for an explicit workspace location
pub trait StoreFactory: Send + Sync {
    fn open(&self, config: WorkspaceConfig) -> Arc<dyn WorkspaceStore>;
}
