//! `scaffold:datasource` - register a new data source.

use super::{validate_identifier, Generator, DATASOURCE};
use crate::actions::GeneratorContext;
use crate::error::ScaffoldError;
use crate::prompt::{Choice, Question};
use crate::workspace::DataSourceDefinition;
use async_trait::async_trait;
use tracing::info;

/// Connectors offered for new data sources, as `(connector, label)`
pub const CONNECTORS: &[(&str, &str)] = &[
    ("memory", "In-memory db"),
    ("mysql", "MySQL"),
    ("postgresql", "PostgreSQL"),
    ("mongodb", "MongoDB"),
    ("oracle", "Oracle"),
    ("mssql", "Microsoft SQL"),
    ("rest", "REST services"),
    ("soap", "SOAP webservices"),
];

pub struct DataSourceGenerator {
    name: Option<String>,
}

impl DataSourceGenerator {
    /// `args[0]`, when present, is the data source name
    pub fn new(args: Vec<String>) -> Self {
        Self {
            name: args.into_iter().next(),
        }
    }
}

#[async_trait]
impl Generator for DataSourceGenerator {
    fn name(&self) -> &'static str {
        DATASOURCE
    }

    async fn run(&mut self, ctx: &mut GeneratorContext) -> Result<(), ScaffoldError> {
        ctx.load_project().await?;
        ctx.load_data_sources().await?;

        let name = match self.name.take() {
            Some(name) => name,
            None => {
                let question = Question::input("name", "Enter the data-source name:");
                let answers = ctx.prompt(std::slice::from_ref(&question)).await?;
                answers.str("name").unwrap_or_default().to_string()
            }
        };
        validate_identifier("data source", &name)?;

        let exists = ctx
            .data_sources
            .iter()
            .flatten()
            .any(|ds| ds.value.as_deref() == Some(name.as_str()));
        if exists {
            return Err(ScaffoldError::InvalidName(format!(
                "data source \"{}\" already exists",
                name
            )));
        }

        let choices = CONNECTORS
            .iter()
            .map(|(connector, label)| Choice::new(format!("{} ({})", label, connector), *connector))
            .collect();
        let question = Question::select(
            "connector",
            format!("Select the connector for {}:", name),
            choices,
        );
        let answers = ctx.prompt(std::slice::from_ref(&question)).await?;
        let connector = answers
            .optional_str("connector")
            .ok_or_else(|| ScaffoldError::InvalidName("no connector selected".to_string()))?;

        ctx.store()?
            .create_data_source(&DataSourceDefinition::new(name.clone(), connector.clone()))
            .await?;
        info!(datasource = %name, connector = %connector, "Data source created");

        ctx.save_project().await
    }
}
