//! Generator actions
//!
//! A generator run owns one [`GeneratorContext`] and calls these actions on it in
//! order. Each action either completes immediately or awaits exactly one
//! collaborator call (prompt, store query, installer) before returning.

use crate::error::ScaffoldError;
use crate::generator::{Generator, GeneratorRegistry};
use crate::install::{DependencyInstaller, InstallRequest, PackageManagerInstaller};
use crate::prompt::{Answers, DialoguerPrompter, Prompter, Question};
use crate::workspace::{
    DataSourceDefinition, JsonStoreFactory, ModelDefinition, StoreFactory, WorkspaceConfig,
    WorkspaceStore, DEFAULT_COMPONENT,
};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Label of the entry that lets the user pick no data source
pub const NO_DATA_SOURCE_LABEL: &str = "(no data-source)";

/// Flags a generator is invoked with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorOptions {
    /// Invoked as a sub-step of another generator
    #[serde(default)]
    pub nested: bool,
    /// Project directory supplied by the invoking generator
    #[serde(default)]
    pub project_dir: Option<PathBuf>,
    #[serde(default)]
    pub skip_install: bool,
}

impl GeneratorOptions {
    /// Project directory owned by a caller, when running nested with one
    pub fn external_project_dir(&self) -> Option<&Path> {
        if self.nested {
            self.project_dir.as_deref()
        } else {
            None
        }
    }
}

/// Display projection of a data source for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceChoice {
    /// `"<name> (<connector>)"`
    pub name: String,
    /// Bare data source name; `None` only for the no-data-source entry
    pub value: Option<String>,
    #[serde(rename = "_connector", skip_serializing_if = "Option::is_none")]
    pub connector: Option<String>,
}

impl DataSourceChoice {
    pub fn from_definition(ds: &DataSourceDefinition) -> Self {
        Self {
            name: format!("{} ({})", ds.name, ds.connector),
            value: Some(ds.name.clone()),
            connector: Some(ds.connector.clone()),
        }
    }

    pub fn none() -> Self {
        Self {
            name: NO_DATA_SOURCE_LABEL.to_string(),
            value: None,
            connector: None,
        }
    }
}

/// Services a generator run talks to
#[derive(Clone)]
pub struct Collaborators {
    pub prompter: Arc<dyn Prompter>,
    pub stores: Arc<dyn StoreFactory>,
    pub installer: Arc<dyn DependencyInstaller>,
    pub generators: Arc<GeneratorRegistry>,
}

impl Collaborators {
    /// Terminal prompts, JSON workspace store, and the given package manager
    pub fn interactive(package_manager: &str) -> Self {
        Self {
            prompter: Arc::new(DialoguerPrompter::new()),
            stores: Arc::new(JsonStoreFactory),
            installer: Arc::new(PackageManagerInstaller::new(package_manager)),
            generators: Arc::new(GeneratorRegistry::with_defaults()),
        }
    }
}

/// Per-run generator state
pub struct GeneratorContext {
    destination_root: PathBuf,
    pub options: GeneratorOptions,
    /// Desired project name; defaults to the destination directory name
    pub app_name: String,
    /// Last answer to the destination directory question
    pub dir: Option<String>,
    pub project_dir: Option<PathBuf>,
    pub project_models: Vec<ModelDefinition>,
    pub model_names: Vec<String>,
    pub data_sources: Option<Vec<DataSourceChoice>>,
    external_project: bool,
    skip_install: bool,
    component: String,
    created: Vec<PathBuf>,
    collaborators: Collaborators,
    store: Option<Arc<dyn WorkspaceStore>>,
}

impl GeneratorContext {
    pub fn new(
        destination_root: impl Into<PathBuf>,
        options: GeneratorOptions,
        collaborators: Collaborators,
    ) -> Self {
        let destination_root = absolute(destination_root.into());
        let app_name = destination_root
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_string();

        Self {
            destination_root,
            options,
            app_name,
            dir: None,
            project_dir: None,
            project_models: Vec::new(),
            model_names: Vec::new(),
            data_sources: None,
            external_project: false,
            skip_install: false,
            component: DEFAULT_COMPONENT.to_string(),
            created: Vec::new(),
            collaborators,
            store: None,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Context for a sub-generator operating on this run's project
    pub fn nested(&self) -> Self {
        let project_dir = self
            .project_dir
            .clone()
            .unwrap_or_else(|| self.destination_root.clone());
        let options = GeneratorOptions {
            nested: true,
            project_dir: Some(project_dir),
            skip_install: self.options.skip_install,
        };
        GeneratorContext::new(self.destination_root.clone(), options, self.collaborators.clone())
            .with_app_name(self.app_name.clone())
            .with_component(self.component.clone())
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Resolve a path against the destination root
    pub fn destination_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.destination_root.join(relative)
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn is_external_project(&self) -> bool {
        self.external_project
    }

    pub fn skip_install(&self) -> bool {
        self.skip_install
    }

    /// Paths created during this run, relative to the destination root
    pub fn created_files(&self) -> &[PathBuf] {
        &self.created
    }

    pub fn record_created(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        info!("create {}", path.display());
        self.created.push(path);
    }

    pub fn store(&self) -> Result<Arc<dyn WorkspaceStore>, ScaffoldError> {
        self.store
            .clone()
            .ok_or(ScaffoldError::WorkspaceNotInitialized)
    }

    pub async fn prompt(&self, questions: &[Question]) -> Result<Answers, ScaffoldError> {
        self.collaborators.prompter.prompt(questions).await
    }

    /// Instantiate a registered generator to run against this context's project
    pub fn compose_with(
        &self,
        name: &str,
        args: Vec<String>,
    ) -> Result<Box<dyn Generator>, ScaffoldError> {
        self.collaborators.generators.create(name, args)
    }

    /// Run a generator to completion; the first failing action ends the run
    pub async fn run(&mut self, generator: &mut dyn Generator) -> Result<(), ScaffoldError> {
        let name = generator.name();
        info!(generator = name, root = %self.destination_root.display(), "Generator run started");
        match generator.run(self).await {
            Ok(()) => {
                info!(generator = name, "Generator run completed");
                Ok(())
            }
            Err(e) => {
                tracing::error!(generator = name, error = %e, "Generator run failed");
                Err(e)
            }
        }
    }

    /// Decide where the project is created, possibly asking the user, and point
    /// every later file operation at that directory.
    pub async fn configure_destination_dir(&mut self) -> Result<(), ScaffoldError> {
        if self.options.external_project_dir().is_some() {
            // the invoking generator already fixed the location
            return Ok(());
        }

        if self.destination_root.file_name() == Some(OsStr::new(&self.app_name)) {
            debug!(app = %self.app_name, "Destination already named after the project");
            return Ok(());
        }

        let question = Question::input("dir", "Enter name of the directory to contain the project:")
            .with_default(self.app_name.clone());
        let answers = self.prompt(std::slice::from_ref(&question)).await?;
        let dir = answers.str("dir").unwrap_or_default().to_string();
        self.dir = Some(dir.clone());

        if dir.is_empty() || dir == "." {
            return Ok(());
        }

        let root = self.destination_root.join(&dir);
        if !root.exists() {
            std::fs::create_dir(&root)?;
            self.record_created(format!("{}/", dir));
        }
        self.destination_root = root;
        info!("change the working directory to {}", dir);
        Ok(())
    }

    /// Establish the project directory for the run. Returns `true` when the
    /// project belongs to an invoking generator and is already initialized.
    pub fn init_workspace(&mut self) -> bool {
        if let Some(dir) = self.options.external_project_dir().map(Path::to_path_buf) {
            self.external_project = true;
            self.open_store(&dir);
            self.project_dir = Some(dir);
            return true;
        }

        let dir = self.destination_root.clone();
        self.open_store(&dir);
        self.project_dir = Some(dir);
        false
    }

    fn open_store(&mut self, dir: &Path) {
        let config = WorkspaceConfig::new(dir).with_component(self.component.clone());
        debug!(workspace = %dir.display(), component = %self.component, "Opening workspace store");
        self.store = Some(self.collaborators.stores.open(config));
    }

    /// Verify the project directory is a project the store recognizes
    pub async fn load_project(&mut self) -> Result<(), ScaffoldError> {
        if self.init_workspace() {
            return Ok(());
        }
        self.store()?.is_valid_dir().await?;
        Ok(())
    }

    /// Persist pending project mutations
    pub async fn save_project(&mut self) -> Result<(), ScaffoldError> {
        if self.external_project {
            return Ok(());
        }
        self.store()?.flush().await?;
        Ok(())
    }

    /// Load every model; fills `project_models` and `model_names`
    pub async fn load_models(&mut self) -> Result<(), ScaffoldError> {
        let models = self.store()?.find_models().await?;
        self.model_names = models.iter().map(|m| m.name.clone()).collect();
        self.project_models = models;
        debug!(count = self.model_names.len(), "Models loaded");
        Ok(())
    }

    /// Install package dependencies unless `skip_install` is set
    pub async fn install_deps(&mut self) -> Result<(), ScaffoldError> {
        self.skip_install = self.options.skip_install;
        let request = InstallRequest {
            project_dir: self
                .project_dir
                .clone()
                .unwrap_or_else(|| self.destination_root.clone()),
            skip_install: self.skip_install,
        };
        self.collaborators.installer.install(request).await
    }

    /// Load every data source as a selection entry
    pub async fn load_data_sources(&mut self) -> Result<(), ScaffoldError> {
        let definitions = self.store()?.find_data_sources().await?;
        self.data_sources = Some(
            definitions
                .iter()
                .map(DataSourceChoice::from_definition)
                .collect(),
        );
        Ok(())
    }

    /// Put the no-data-source entry in front of the loaded data sources
    pub fn add_null_data_source_item(&mut self) -> Result<(), ScaffoldError> {
        let data_sources = self
            .data_sources
            .as_mut()
            .ok_or(ScaffoldError::DataSourcesNotLoaded)?;
        data_sources.insert(0, DataSourceChoice::none());
        Ok(())
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    };
    dunce::canonicalize(&path).unwrap_or(path)
}
