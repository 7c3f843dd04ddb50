//! CLI route: one entry point per command, dispatching to generators or the store.

use crate::actions::{Collaborators, GeneratorContext, GeneratorOptions};
use crate::cli::help::{command_name, generator_invocation};
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_toml, format_created_files, format_data_source_list, format_model_list,
    format_validate_result,
};
use crate::config::{ConfigLoader, ScaffoldConfig};
use crate::error::ScaffoldError;
use crate::workspace::{JsonWorkspaceStore, WorkspaceConfig, WorkspaceStore};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: workspace, loaded configuration and run options.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ScaffoldConfig,
    options: GeneratorOptions,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ScaffoldError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ScaffoldError::ConfigError(format!(
                "Configuration validation failed: {}",
                error_msgs.join("; ")
            ))
        })?;

        let options = GeneratorOptions {
            skip_install: config.generator.skip_install,
            ..GeneratorOptions::default()
        };

        Ok(Self {
            workspace_root,
            config,
            options,
        })
    }

    /// Override the generator flags; `skip_install` from the configuration still applies.
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        let skip_install = options.skip_install || self.config.generator.skip_install;
        self.options = GeneratorOptions {
            skip_install,
            ..options
        };
        self
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a command with terminal prompts and the configured package manager.
    pub fn execute(&self, command: &Commands) -> Result<String, ScaffoldError> {
        self.execute_with(
            command,
            Collaborators::interactive(&self.config.generator.package_manager),
        )
    }

    /// Execute a command with explicit collaborators.
    pub fn execute_with(
        &self,
        command: &Commands,
        collaborators: Collaborators,
    ) -> Result<String, ScaffoldError> {
        let started = Instant::now();
        let rt = tokio::runtime::Runtime::new()?;
        let result = rt.block_on(self.dispatch(command, collaborators));
        debug!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    async fn dispatch(
        &self,
        command: &Commands,
        collaborators: Collaborators,
    ) -> Result<String, ScaffoldError> {
        if let Some((generator, args)) = generator_invocation(command) {
            return self.run_generator(generator, args, collaborators).await;
        }

        match command {
            Commands::Models { format } => {
                let store = self.open_store();
                store.is_valid_dir().await?;
                let models = store.find_models().await?;
                format_model_list(&models, format)
            }
            Commands::Datasources { format } => {
                let store = self.open_store();
                store.is_valid_dir().await?;
                let data_sources = store.find_data_sources().await?;
                format_data_source_list(&data_sources, format)
            }
            Commands::Validate => {
                let store = self.open_store();
                store.is_valid_dir().await?;
                Ok(format_validate_result(
                    store.workspace_dir(),
                    &self.config.generator.component,
                ))
            }
            Commands::Config => format_config_toml(&self.config),
            Commands::App { .. }
            | Commands::Model { .. }
            | Commands::Property { .. }
            | Commands::Datasource { .. } => Err(ScaffoldError::UnknownGenerator(
                command_name(command).to_string(),
            )),
        }
    }

    async fn run_generator(
        &self,
        name: &str,
        args: Vec<String>,
        collaborators: Collaborators,
    ) -> Result<String, ScaffoldError> {
        let mut generator = collaborators.generators.create(name, args)?;
        let mut ctx = GeneratorContext::new(&self.workspace_root, self.options.clone(), collaborators)
            .with_component(self.config.generator.component.clone());

        info!(generator = name, workspace = %ctx.destination_root().display(), "Running generator");
        ctx.run(generator.as_mut()).await?;

        Ok(format_created_files(ctx.created_files(), ctx.destination_root()))
    }

    fn open_store(&self) -> JsonWorkspaceStore {
        JsonWorkspaceStore::new(
            WorkspaceConfig::new(&self.workspace_root)
                .with_component(self.config.generator.component.clone()),
        )
    }
}
