//! `scaffold:property` - add properties to an existing model until an empty
//! name is entered.

use super::{validate_identifier, Generator, PROPERTY};
use crate::actions::GeneratorContext;
use crate::error::ScaffoldError;
use crate::prompt::{Choice, Question};
use crate::workspace::{PropertyDefinition, PropertyType};
use async_trait::async_trait;
use tracing::info;

pub struct PropertyGenerator {
    model: Option<String>,
}

impl PropertyGenerator {
    /// `args[0]`, when present, is the model to extend
    pub fn new(args: Vec<String>) -> Self {
        Self {
            model: args.into_iter().next(),
        }
    }

    async fn select_model(ctx: &mut GeneratorContext) -> Result<String, ScaffoldError> {
        ctx.load_models().await?;
        let choices = ctx
            .model_names
            .iter()
            .map(|name| Choice::new(name.clone(), name.clone()))
            .collect();
        let question = Question::select("model", "Select the model:", choices);
        let answers = ctx.prompt(std::slice::from_ref(&question)).await?;
        answers
            .optional_str("model")
            .ok_or_else(|| ScaffoldError::InvalidName("the project has no models".to_string()))
    }
}

#[async_trait]
impl Generator for PropertyGenerator {
    fn name(&self) -> &'static str {
        PROPERTY
    }

    async fn run(&mut self, ctx: &mut GeneratorContext) -> Result<(), ScaffoldError> {
        ctx.load_project().await?;

        let model = match self.model.take() {
            Some(model) => model,
            None => Self::select_model(ctx).await?,
        };

        let name_question = Question::input(
            "propertyName",
            "Enter an empty property name when done.\nProperty name:",
        );
        let type_choices: Vec<Choice> = PropertyType::ALL
            .iter()
            .map(|t| Choice::new(t.as_str(), t.as_str()))
            .collect();

        loop {
            let answers = ctx.prompt(std::slice::from_ref(&name_question)).await?;
            let property = answers.str("propertyName").unwrap_or_default().trim().to_string();
            if property.is_empty() {
                break;
            }
            validate_identifier("property", &property)?;

            let questions = [
                Question::select("propertyType", "Property type:", type_choices.clone()),
                Question::confirm("required", "Required?", false),
            ];
            let answers = ctx.prompt(&questions).await?;
            let type_name = answers.str("propertyType").unwrap_or_default();
            let property_type = PropertyType::parse(type_name).ok_or_else(|| {
                ScaffoldError::InvalidName(format!("unknown property type \"{}\"", type_name))
            })?;
            let definition = PropertyDefinition {
                property_type,
                required: answers.bool("required").unwrap_or(false),
            };

            ctx.store()?.add_property(&model, &property, &definition).await?;
            info!(model = %model, property = %property, property_type = property_type.as_str(), "Property added");
        }

        ctx.save_project().await
    }
}
