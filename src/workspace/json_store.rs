//! JSON-file backed workspace store.
//!
//! Layout under the workspace directory:
//! - `package.json`
//! - `models/<lowercase name>.json`
//! - `<component>/models.json` (model name -> registry entry)
//! - `<component>/datasources.json` (data source name -> definition)
//!
//! Every mutation is written through immediately, so [`WorkspaceStore::flush`] has
//! nothing to do.

use super::{
    DataSourceDefinition, ModelConfig, ModelDefinition, PropertyDefinition, StoreFactory,
    WorkspaceConfig, WorkspaceStore,
};
use crate::error::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Models every new project registers, as `(name, public)`
pub const BUILTIN_MODELS: &[(&str, bool)] = &[
    ("User", true),
    ("AccessToken", false),
    ("ACL", false),
    ("RoleMapping", false),
    ("Role", false),
];

const PACKAGE_FILE: &str = "package.json";
const MODELS_DIR: &str = "models";
const REGISTRY_FILE: &str = "models.json";
const DATASOURCES_FILE: &str = "datasources.json";
const DEFAULT_DATASOURCE: &str = "db";

pub struct JsonWorkspaceStore {
    config: WorkspaceConfig,
}

impl JsonWorkspaceStore {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    fn registry_path(&self) -> PathBuf {
        self.config.component_dir().join(REGISTRY_FILE)
    }

    fn datasources_path(&self) -> PathBuf {
        self.config.component_dir().join(DATASOURCES_FILE)
    }

    fn model_path(&self, file_stem: &str) -> PathBuf {
        self.config
            .workspace_dir
            .join(MODELS_DIR)
            .join(format!("{}.json", file_stem))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.config.workspace_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn load_registry(&self) -> Result<Map<String, Value>, StoreError> {
        read_json_or_default(&self.registry_path())
    }

    fn load_datasources(&self) -> Result<Map<String, Value>, StoreError> {
        read_json_or_default(&self.datasources_path())
    }
}

/// Registry key naming the same model, ignoring case
fn registered_name<'a>(registry: &'a Map<String, Value>, name: &str) -> Option<&'a String> {
    registry.keys().find(|key| key.eq_ignore_ascii_case(name))
}

#[async_trait]
impl WorkspaceStore for JsonWorkspaceStore {
    fn workspace_dir(&self) -> &Path {
        &self.config.workspace_dir
    }

    async fn is_valid_dir(&self) -> Result<(), StoreError> {
        let dir = &self.config.workspace_dir;
        let invalid = |reason: String| StoreError::InvalidProject {
            path: dir.clone(),
            reason,
        };

        if !dir.is_dir() {
            return Err(invalid("directory does not exist".to_string()));
        }

        let package_path = dir.join(PACKAGE_FILE);
        if !package_path.is_file() {
            return Err(invalid(format!("missing {}", PACKAGE_FILE)));
        }
        let package: Value = read_json(&package_path)?;
        if package.get("name").and_then(Value::as_str).is_none() {
            return Err(invalid(format!("{} has no \"name\"", PACKAGE_FILE)));
        }

        if !self.config.component_dir().is_dir() {
            return Err(invalid(format!(
                "missing component directory \"{}\"",
                self.config.component
            )));
        }

        debug!(workspace = %dir.display(), "Workspace directory is a valid project");
        Ok(())
    }

    async fn find_models(&self) -> Result<Vec<ModelDefinition>, StoreError> {
        let registry = self.load_registry()?;
        let mut models = Vec::with_capacity(registry.len());

        for name in registry.keys() {
            let path = self.model_path(&name.to_lowercase());
            let definition = if path.is_file() {
                // the registry key is authoritative, the file stem is lowercased
                let mut definition: ModelDefinition = read_json(&path)?;
                definition.name = name.clone();
                definition
            } else {
                ModelDefinition::named(name.clone())
            };
            models.push(definition);
        }

        Ok(models)
    }

    async fn find_data_sources(&self) -> Result<Vec<DataSourceDefinition>, StoreError> {
        let path = self.datasources_path();
        let entries = self.load_datasources()?;

        entries
            .into_iter()
            .map(|(name, mut value)| {
                // the key is authoritative, older files omit "name"
                if let Value::Object(ref mut obj) = value {
                    obj.insert("name".to_string(), Value::String(name));
                }
                serde_json::from_value(value).map_err(|source| StoreError::Json {
                    path: path.clone(),
                    source,
                })
            })
            .collect()
    }

    async fn create_project(&self, name: &str) -> Result<Vec<PathBuf>, StoreError> {
        let dir = &self.config.workspace_dir;
        let package_path = dir.join(PACKAGE_FILE);
        if package_path.exists() {
            return Err(StoreError::InvalidProject {
                path: dir.clone(),
                reason: format!("{} already exists", PACKAGE_FILE),
            });
        }

        let package = json!({
            "name": name,
            "version": "1.0.0",
            "private": true,
            "dependencies": {}
        });

        let mut registry = Map::new();
        for (model, public) in BUILTIN_MODELS {
            let entry = ModelConfig {
                data_source: Some(DEFAULT_DATASOURCE.to_string()),
                public: *public,
            };
            registry.insert(model.to_string(), to_value(&entry, &self.registry_path())?);
        }

        let mut datasources = Map::new();
        let db = DataSourceDefinition::new(DEFAULT_DATASOURCE, "memory");
        datasources.insert(db.name.clone(), to_value(&db, &self.datasources_path())?);

        let written = vec![package_path, self.registry_path(), self.datasources_path()];
        write_json(&written[0], &package)?;
        write_json(&written[1], &registry)?;
        write_json(&written[2], &datasources)?;
        std::fs::create_dir_all(dir.join(MODELS_DIR))?;

        debug!(workspace = %dir.display(), project = name, "Project skeleton written");
        Ok(written.iter().map(|p| self.relative(p)).collect())
    }

    async fn create_model(
        &self,
        definition: &ModelDefinition,
        config: &ModelConfig,
    ) -> Result<PathBuf, StoreError> {
        let mut registry = self.load_registry()?;
        let path = self.model_path(&definition.file_stem());
        if registered_name(&registry, &definition.name).is_some() || path.exists() {
            return Err(StoreError::ModelExists(definition.name.clone()));
        }

        write_json(&path, definition)?;
        registry.insert(
            definition.name.clone(),
            to_value(config, &self.registry_path())?,
        );
        write_json(&self.registry_path(), &registry)?;

        debug!(model = %definition.name, path = %path.display(), "Model created");
        Ok(self.relative(&path))
    }

    async fn add_property(
        &self,
        model: &str,
        property: &str,
        definition: &PropertyDefinition,
    ) -> Result<(), StoreError> {
        let path = self.model_path(&model.to_lowercase());
        let mut model_def: ModelDefinition = if path.is_file() {
            read_json(&path)?
        } else {
            // registered models such as the built-ins start without a file
            let registry = self.load_registry()?;
            match registered_name(&registry, model) {
                Some(name) => ModelDefinition::named(name.clone()),
                None => return Err(StoreError::ModelNotFound(model.to_string())),
            }
        };
        model_def
            .properties
            .insert(property.to_string(), to_value(definition, &path)?);
        write_json(&path, &model_def)?;

        debug!(model, property, "Property added");
        Ok(())
    }

    async fn create_data_source(
        &self,
        definition: &DataSourceDefinition,
    ) -> Result<(), StoreError> {
        let mut datasources = self.load_datasources()?;
        if datasources.contains_key(&definition.name) {
            return Err(StoreError::DataSourceExists(definition.name.clone()));
        }

        datasources.insert(
            definition.name.clone(),
            to_value(definition, &self.datasources_path())?,
        );
        write_json(&self.datasources_path(), &datasources)?;

        debug!(datasource = %definition.name, connector = %definition.connector, "Data source created");
        Ok(())
    }

    async fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Opens [`JsonWorkspaceStore`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStoreFactory;

impl StoreFactory for JsonStoreFactory {
    fn open(&self, config: WorkspaceConfig) -> Arc<dyn WorkspaceStore> {
        Arc::new(JsonWorkspaceStore::new(config))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json_or_default(path: &Path) -> Result<Map<String, Value>, StoreError> {
    if !path.exists() {
        return Ok(Map::new());
    }
    read_json(path)
}

fn to_value<T: Serialize>(value: &T, path: &Path) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print with a trailing newline, replacing the target atomically
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let mut content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| StoreError::IoError(e.error))?;
    Ok(())
}
