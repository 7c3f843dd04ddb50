//! Scripted prompter for non-interactive runs.

use super::{Answers, Prompter, Question};
use crate::error::ScaffoldError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};

/// Answers questions from a fixed map instead of a terminal.
///
/// A name mapped with [`FixedAnswers::new`] always gets the same answer. A name
/// given a sequence with [`FixedAnswers::with_sequence`] gets the next queued value
/// each time it is asked. Anything else gets the question's default.
#[derive(Debug, Default)]
pub struct FixedAnswers {
    fixed: Map<String, Value>,
    sequences: Mutex<HashMap<String, VecDeque<Value>>>,
    asked: Mutex<Vec<String>>,
}

impl FixedAnswers {
    pub fn new(answers: Map<String, Value>) -> Self {
        Self {
            fixed: answers,
            ..Self::default()
        }
    }

    /// Build from a JSON object; non-object values give an empty script
    pub fn from_json(answers: Value) -> Self {
        match answers {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn with_sequence(self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.sequences.lock().insert(name.into(), values.into());
        self
    }

    /// Names of every question asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }

    fn answer(&self, question: &Question) -> Value {
        if let Some(queue) = self.sequences.lock().get_mut(&question.name) {
            if let Some(value) = queue.pop_front() {
                return value;
            }
        }
        self.fixed
            .get(&question.name)
            .cloned()
            .unwrap_or_else(|| question.default_answer())
    }
}

#[async_trait]
impl Prompter for FixedAnswers {
    async fn prompt(&self, questions: &[Question]) -> Result<Answers, ScaffoldError> {
        let mut answers = Answers::new();
        for question in questions {
            self.asked.lock().push(question.name.clone());
            answers.insert(question.name.clone(), self.answer(question));
        }
        Ok(answers)
    }
}
