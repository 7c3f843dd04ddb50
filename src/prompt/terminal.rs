//! Interactive prompter backed by `dialoguer`.

use super::{Answers, Prompter, Question, QuestionKind};
use crate::error::ScaffoldError;
use async_trait::async_trait;
use dialoguer::{Confirm, Input, Select};
use serde_json::Value;

/// Asks on the controlling terminal. Each batch runs on the blocking pool so the
/// runtime is not stalled while the user types.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn prompt(&self, questions: &[Question]) -> Result<Answers, ScaffoldError> {
        let questions = questions.to_vec();
        tokio::task::spawn_blocking(move || ask_all(&questions))
            .await
            .map_err(|e| ScaffoldError::Prompt(format!("prompt task failed: {}", e)))?
    }
}

fn ask_all(questions: &[Question]) -> Result<Answers, ScaffoldError> {
    let mut answers = Answers::new();
    for question in questions {
        let value = ask(question)?;
        answers.insert(question.name.clone(), value);
    }
    Ok(answers)
}

fn ask(question: &Question) -> Result<Value, ScaffoldError> {
    match &question.kind {
        QuestionKind::Input { default } => {
            let mut input = Input::<String>::new()
                .with_prompt(&question.message)
                .allow_empty(true);
            if let Some(default) = default {
                input = input.default(default.clone());
            }
            Ok(Value::String(input.interact_text()?))
        }
        QuestionKind::Confirm { default } => {
            let confirmed = Confirm::new()
                .with_prompt(&question.message)
                .default(*default)
                .interact()?;
            Ok(Value::Bool(confirmed))
        }
        QuestionKind::Select { choices, default } => {
            if choices.is_empty() {
                return Ok(Value::Null);
            }
            let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
            let selection = Select::new()
                .with_prompt(&question.message)
                .items(labels.as_slice())
                .default(*default)
                .interact()?;
            Ok(choices[selection].value.clone())
        }
    }
}
