//! Prompt provider
//!
//! Generators ask their questions through [`Prompter`]. The terminal implementation
//! drives `dialoguer`; [`FixedAnswers`] answers from a script so runs need no user.

mod fixed;
mod terminal;

pub use fixed::FixedAnswers;
pub use terminal::DialoguerPrompter;

use crate::error::ScaffoldError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// One question asked of the user
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Key the answer is stored under
    pub name: String,
    pub message: String,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    Input { default: Option<String> },
    Confirm { default: bool },
    Select { choices: Vec<Choice>, default: usize },
}

/// A selectable entry: what is displayed, and what the answer becomes
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: Value,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Question {
    pub fn input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: QuestionKind::Input { default: None },
        }
    }

    pub fn confirm(name: impl Into<String>, message: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: QuestionKind::Confirm { default },
        }
    }

    pub fn select(
        name: impl Into<String>,
        message: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            kind: QuestionKind::Select {
                choices,
                default: 0,
            },
        }
    }

    /// Set the default of an input question, or the preselected choice of a select
    /// question whose value matches. Ignored otherwise.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        let default = default.into();
        match &mut self.kind {
            QuestionKind::Input { default: d } => *d = Some(default),
            QuestionKind::Select { choices, default: d } => {
                if let Some(idx) = choices.iter().position(|c| c.value == default.as_str()) {
                    *d = idx;
                }
            }
            QuestionKind::Confirm { .. } => {}
        }
        self
    }

    /// Answer given when the user accepts the default
    pub fn default_answer(&self) -> Value {
        match &self.kind {
            QuestionKind::Input { default } => {
                Value::String(default.clone().unwrap_or_default())
            }
            QuestionKind::Confirm { default } => Value::Bool(*default),
            QuestionKind::Select { choices, default } => choices
                .get(*default)
                .map(|c| c.value.clone())
                .unwrap_or(Value::Null),
        }
    }
}

/// Answers keyed by question name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers(Map<String, Value>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// String answer, with `null` read as absent
    pub fn optional_str(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Source of answers for a generator's questions
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Ask every question in order; the result holds one answer per question
    async fn prompt(&self, questions: &[Question]) -> Result<Answers, ScaffoldError>;
}
