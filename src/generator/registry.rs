//! Name -> factory lookup for generators.

use super::{AppGenerator, DataSourceGenerator, Generator, ModelGenerator, PropertyGenerator};
use crate::error::ScaffoldError;
use std::collections::HashMap;

pub const APP: &str = "scaffold:app";
pub const MODEL: &str = "scaffold:model";
pub const PROPERTY: &str = "scaffold:property";
pub const DATASOURCE: &str = "scaffold:datasource";

/// Builds a generator from its positional arguments
pub type GeneratorFactory = fn(Vec<String>) -> Box<dyn Generator>;

const BUILTIN: &[(&str, GeneratorFactory)] = &[
    (APP, app as GeneratorFactory),
    (MODEL, model as GeneratorFactory),
    (PROPERTY, property as GeneratorFactory),
    (DATASOURCE, datasource as GeneratorFactory),
];

fn app(args: Vec<String>) -> Box<dyn Generator> {
    Box::new(AppGenerator::new(args))
}

fn model(args: Vec<String>) -> Box<dyn Generator> {
    Box::new(ModelGenerator::new(args))
}

fn property(args: Vec<String>) -> Box<dyn Generator> {
    Box::new(PropertyGenerator::new(args))
}

fn datasource(args: Vec<String>) -> Box<dyn Generator> {
    Box::new(DataSourceGenerator::new(args))
}

#[derive(Default)]
pub struct GeneratorRegistry {
    factories: HashMap<String, GeneratorFactory>,
}

impl GeneratorRegistry {
    /// Empty registry; generators must be registered before they can be composed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, factory) in BUILTIN {
            registry.register(*name, *factory);
        }
        registry
    }

    /// Factory of a generator shipped with the crate
    pub fn builtin(name: &str) -> Option<GeneratorFactory> {
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, factory)| *factory)
    }

    pub fn register(&mut self, name: impl Into<String>, factory: GeneratorFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(&self, name: &str, args: Vec<String>) -> Result<Box<dyn Generator>, ScaffoldError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ScaffoldError::UnknownGenerator(name.to_string()))?;
        Ok(factory(args))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
