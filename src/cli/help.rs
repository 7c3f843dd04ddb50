//! Command-name contract for logging and routing.

use crate::cli::parse::Commands;
use crate::generator::{APP, DATASOURCE, MODEL, PROPERTY};

/// Command name recorded on the run's log lines (e.g. "model", "datasources").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::App { .. } => "app",
        Commands::Model { .. } => "model",
        Commands::Property { .. } => "property",
        Commands::Datasource { .. } => "datasource",
        Commands::Models { .. } => "models",
        Commands::Datasources { .. } => "datasources",
        Commands::Validate => "validate",
        Commands::Config => "config",
    }
}

/// Registered generator and its positional arguments, for generator commands only.
pub fn generator_invocation(command: &Commands) -> Option<(&'static str, Vec<String>)> {
    let (name, arg) = match command {
        Commands::App { name } => (APP, name.clone()),
        Commands::Model { name } => (MODEL, name.clone()),
        Commands::Property { model } => (PROPERTY, Some(model.clone())),
        Commands::Datasource { name } => (DATASOURCE, name.clone()),
        _ => return None,
    };
    Some((name, arg.into_iter().collect()))
}
