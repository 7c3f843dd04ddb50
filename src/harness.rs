//! Generator test harness
//!
//! Runs generators end-to-end against a disposable directory with scripted prompt
//! answers, then reads back the JSON they wrote.
//!
//! ```no_run
//! # async fn scenario() -> anyhow::Result<()> {
//! use scaffold::harness::{create_dummy_project, create_generator, Sandbox};
//! use scaffold::actions::GeneratorOptions;
//! use serde_json::json;
//!
//! let sandbox = Sandbox::temporary()?;
//! create_dummy_project(sandbox.path(), "test-app").await?;
//!
//! let mut generator = create_generator(
//!     sandbox.path(),
//!     "scaffold:model",
//!     &["scaffold:property"],
//!     vec!["Product".to_string()],
//!     GeneratorOptions::default(),
//! )?;
//! generator.mock_prompt(json!({ "dataSource": "db", "propertyName": "" }));
//! generator.run().await?;
//!
//! let product = sandbox.read_json("models/product.json")?;
//! assert_eq!(product["name"], "Product");
//! # Ok(())
//! # }
//! ```

use crate::actions::{Collaborators, GeneratorContext, GeneratorOptions};
use crate::error::ScaffoldError;
use crate::generator::{Generator, GeneratorRegistry};
use crate::install::RecordingInstaller;
use crate::prompt::FixedAnswers;
use crate::workspace::{JsonStoreFactory, JsonWorkspaceStore, WorkspaceConfig, WorkspaceStore};
use anyhow::Context;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Isolated directory a scenario writes into
pub struct Sandbox {
    root: PathBuf,
    // removes the directory on drop for temporary sandboxes
    _temp: Option<TempDir>,
}

impl Sandbox {
    /// Fresh, uniquely named directory, deleted when the sandbox is dropped
    pub fn temporary() -> anyhow::Result<Self> {
        let temp = TempDir::new().context("failed to create sandbox directory")?;
        let root = dunce::canonicalize(temp.path())?;
        Ok(Self {
            root,
            _temp: Some(temp),
        })
    }

    /// Fixed directory, emptied and recreated. It is left in place afterwards.
    pub fn at(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            std::fs::remove_dir_all(path)
                .with_context(|| format!("failed to clear sandbox {}", path.display()))?;
        }
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create sandbox {}", path.display()))?;
        Ok(Self {
            root: dunce::canonicalize(path)?,
            _temp: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Remove everything inside the sandbox, keeping the directory itself
    pub fn reset(&self) -> anyhow::Result<()> {
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_dir() {
                std::fs::remove_dir_all(&path)?;
            } else {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Every file in the sandbox, relative and sorted
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.path().strip_prefix(&self.root).ok().map(Path::to_path_buf))
            .collect();
        files.sort();
        files
    }

    pub fn read_json(&self, relative: impl AsRef<Path>) -> anyhow::Result<Value> {
        let path = self.join(relative);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
    }

    /// Model registry of a component; `None` reads `models.json` at the root
    pub fn read_models_json(&self, component: Option<&str>) -> anyhow::Result<Map<String, Value>> {
        let relative = Path::new(component.unwrap_or(".")).join("models.json");
        match self.read_json(&relative)? {
            Value::Object(map) => Ok(map),
            other => anyhow::bail!("{} is not an object: {}", relative.display(), other),
        }
    }
}

/// Write a minimal valid project named `name` into `dir`
pub async fn create_dummy_project(dir: &Path, name: &str) -> anyhow::Result<()> {
    let store = JsonWorkspaceStore::new(WorkspaceConfig::new(dir));
    store
        .create_project(name)
        .await
        .with_context(|| format!("failed to create dummy project in {}", dir.display()))?;
    Ok(())
}

/// A generator prepared to run inside a sandbox
pub struct TestGenerator {
    generator: Box<dyn Generator>,
    root: PathBuf,
    options: GeneratorOptions,
    app_name: Option<String>,
    registry: Arc<GeneratorRegistry>,
    prompter: Arc<FixedAnswers>,
    installer: Arc<RecordingInstaller>,
    context: Option<GeneratorContext>,
}

/// Instantiate generator `name` with only `name` and `deps` registered
pub fn create_generator(
    root: &Path,
    name: &str,
    deps: &[&str],
    args: Vec<String>,
    options: GeneratorOptions,
) -> Result<TestGenerator, ScaffoldError> {
    let mut registry = GeneratorRegistry::new();
    for generator in std::iter::once(&name).chain(deps) {
        let factory = GeneratorRegistry::builtin(generator)
            .ok_or_else(|| ScaffoldError::UnknownGenerator(generator.to_string()))?;
        registry.register(*generator, factory);
    }
    let generator = registry.create(name, args)?;

    Ok(TestGenerator {
        generator,
        root: root.to_path_buf(),
        options,
        app_name: None,
        registry: Arc::new(registry),
        prompter: Arc::new(FixedAnswers::default()),
        installer: Arc::new(RecordingInstaller::new()),
        context: None,
    })
}

impl TestGenerator {
    /// Answer prompts from a JSON object instead of the terminal
    pub fn mock_prompt(&mut self, answers: Value) -> &mut Self {
        self.prompter = Arc::new(FixedAnswers::from_json(answers));
        self
    }

    pub fn with_prompter(&mut self, prompter: FixedAnswers) -> &mut Self {
        self.prompter = Arc::new(prompter);
        self
    }

    pub fn with_app_name(&mut self, app_name: impl Into<String>) -> &mut Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn prompter(&self) -> &FixedAnswers {
        &self.prompter
    }

    pub fn installer(&self) -> &RecordingInstaller {
        &self.installer
    }

    /// Context of the last run
    pub fn context(&self) -> Option<&GeneratorContext> {
        self.context.as_ref()
    }

    /// Run the generator to completion
    pub async fn run(&mut self) -> Result<(), ScaffoldError> {
        let collaborators = Collaborators {
            prompter: self.prompter.clone(),
            stores: Arc::new(JsonStoreFactory),
            installer: self.installer.clone(),
            generators: self.registry.clone(),
        };
        let mut ctx = GeneratorContext::new(&self.root, self.options.clone(), collaborators);
        if let Some(app_name) = &self.app_name {
            ctx = ctx.with_app_name(app_name.clone());
        }

        let result = ctx.run(self.generator.as_mut()).await;
        self.context = Some(ctx);
        result
    }
}
