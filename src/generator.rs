//! Generators
//!
//! Each generator is an ordered composition of the actions on
//! [`GeneratorContext`](crate::actions::GeneratorContext). They are looked up by
//! name through a [`GeneratorRegistry`] so one generator can compose another.

mod app;
mod datasource;
mod model;
mod property;
mod registry;

pub use app::AppGenerator;
pub use datasource::{DataSourceGenerator, CONNECTORS};
pub use model::ModelGenerator;
pub use property::PropertyGenerator;
pub use registry::{GeneratorFactory, GeneratorRegistry, APP, DATASOURCE, MODEL, PROPERTY};

use crate::actions::GeneratorContext;
use crate::error::ScaffoldError;
use async_trait::async_trait;

#[async_trait]
pub trait Generator: Send {
    /// Registered name, e.g. `scaffold:model`
    fn name(&self) -> &'static str;

    async fn run(&mut self, ctx: &mut GeneratorContext) -> Result<(), ScaffoldError>;
}

/// Check a model, property or data source name: a letter, `_` or `$`, followed by
/// letters, digits, `_` or `$`.
pub fn validate_identifier(kind: &str, name: &str) -> Result<(), ScaffoldError> {
    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| ScaffoldError::InvalidName(format!("{} name cannot be empty", kind)))?;

    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return Err(ScaffoldError::InvalidName(format!(
            "{} name \"{}\" must start with a letter, `_` or `$`",
            kind, name
        )));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$')) {
        return Err(ScaffoldError::InvalidName(format!(
            "{} name \"{}\" contains an invalid character '{}'",
            kind, name, bad
        )));
    }
    Ok(())
}

/// Check an application (package) name
pub fn validate_app_name(name: &str) -> Result<(), ScaffoldError> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::InvalidName(
            "application name cannot be empty".to_string(),
        ));
    }
    if name.starts_with('.') || name.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(ScaffoldError::InvalidName(format!(
            "application name \"{}\" must not start with '.' or contain spaces or slashes",
            name
        )));
    }
    Ok(())
}
