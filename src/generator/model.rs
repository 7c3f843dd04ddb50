//! `scaffold:model` - add a model definition and register it.

use super::{validate_identifier, Generator, MODEL, PROPERTY};
use crate::actions::GeneratorContext;
use crate::error::ScaffoldError;
use crate::prompt::{Choice, Question};
use crate::workspace::{ModelConfig, ModelDefinition};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

/// Data source preselected when the project has one of that name
const PREFERRED_DATA_SOURCE: &str = "db";

pub struct ModelGenerator {
    name: Option<String>,
}

impl ModelGenerator {
    /// `args[0]`, when present, is the model name
    pub fn new(args: Vec<String>) -> Self {
        Self {
            name: args.into_iter().next(),
        }
    }

    fn data_source_question(ctx: &GeneratorContext, model: &str) -> Question {
        let choices = ctx
            .data_sources
            .iter()
            .flatten()
            .map(|ds| {
                let value = ds.value.clone().map(Value::String).unwrap_or(Value::Null);
                Choice::new(ds.name.clone(), value)
            })
            .collect();
        Question::select(
            "dataSource",
            format!("Select the data-source to attach {} to:", model),
            choices,
        )
        .with_default(PREFERRED_DATA_SOURCE)
    }
}

#[async_trait]
impl Generator for ModelGenerator {
    fn name(&self) -> &'static str {
        MODEL
    }

    async fn run(&mut self, ctx: &mut GeneratorContext) -> Result<(), ScaffoldError> {
        ctx.load_project().await?;
        ctx.load_models().await?;
        ctx.load_data_sources().await?;
        ctx.add_null_data_source_item()?;

        let name = match self.name.take() {
            Some(name) => name,
            None => {
                let question = Question::input("name", "Enter the model name:");
                let answers = ctx.prompt(std::slice::from_ref(&question)).await?;
                answers.str("name").unwrap_or_default().to_string()
            }
        };
        validate_identifier("model", &name)?;
        // definition files are keyed by the lowercased name
        if let Some(existing) = ctx
            .model_names
            .iter()
            .find(|existing| existing.eq_ignore_ascii_case(&name))
        {
            return Err(ScaffoldError::InvalidName(format!(
                "model \"{}\" already exists as \"{}\"",
                name, existing
            )));
        }

        let questions = [
            Self::data_source_question(ctx, &name),
            Question::confirm("public", format!("Expose {} via the REST API?", name), true),
        ];
        let answers = ctx.prompt(&questions).await?;
        let config = ModelConfig {
            data_source: answers.optional_str("dataSource"),
            public: answers.bool("public").unwrap_or(true),
        };

        let path = ctx
            .store()?
            .create_model(&ModelDefinition::named(name.clone()), &config)
            .await?;
        ctx.record_created(path);

        info!("Let's add some {} properties now.", name);
        let mut property = ctx.compose_with(PROPERTY, vec![name.clone()])?;
        let mut nested = ctx.nested();
        nested.run(property.as_mut()).await?;

        ctx.save_project().await
    }
}
