//! Operator prompts behind a swappable provider.
//!
//! [`TerminalPrompter`] talks to the real terminal through dialoguer.
//! [`ScriptedPrompter`] replays canned answers so flows can run unattended.

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::{Confirm, Input, MultiSelect, Select};
use tracing::debug;

use crate::error::PromptError;

/// Validation callback for free-text answers. `Err` carries the message shown
/// to the operator before asking again.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// Accepts any answer.
pub fn accept_any(_: &str) -> Result<(), String> {
    Ok(())
}

/// Rejects blank answers.
pub fn require_non_empty(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err("Value cannot be empty".to_string())
    } else {
        Ok(())
    }
}

/// Asks the operator questions.
pub trait Prompter {
    /// Free-text question, re-asked until `validate` accepts the answer.
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, PromptError>;

    /// Single choice; returns the chosen index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize, PromptError>;

    /// Any number of choices; returns the chosen indices.
    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>, PromptError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;
}

/// Interactive prompts on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, PromptError> {
        let mut question = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            question = question.default(default.to_string());
        }

        let answer = question
            .validate_with(|input: &String| validate(input))
            .interact_text()?;

        Ok(answer)
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize, PromptError> {
        let index = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?;
        Ok(index)
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        let indices = MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .interact()?;
        Ok(indices)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        let answer = Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }
}

/// One canned answer for [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Free text for [`Prompter::input`].
    Text(String),
    /// Index for [`Prompter::select`].
    Choice(usize),
    /// Indices for [`Prompter::multi_select`].
    Choices(Vec<usize>),
    /// Answer for [`Prompter::confirm`].
    Yes(bool),
    /// Take the prompt's default (input and confirm only).
    Default,
}

impl Answer {
    pub fn text(s: impl Into<String>) -> Self {
        Answer::Text(s.into())
    }
}

/// Replays a fixed queue of answers.
///
/// A text answer rejected by the validator is dropped and the next one is
/// tried, the same way a terminal user would be asked again.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, prompt: &str) -> Result<Answer, PromptError> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| PromptError::ScriptExhausted(prompt.to_string()))
    }
}

fn unexpected(prompt: &str, expected: &'static str) -> PromptError {
    PromptError::UnexpectedAnswer {
        prompt: prompt.to_string(),
        expected,
    }
}

impl Prompter for ScriptedPrompter {
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, PromptError> {
        loop {
            let answer = match self.next(prompt)? {
                Answer::Text(text) => text,
                Answer::Default => default.unwrap_or_default().to_string(),
                _ => return Err(unexpected(prompt, "text answer")),
            };

            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => debug!("Scripted answer '{}' rejected: {}", answer, reason),
            }
        }
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize, PromptError> {
        match self.next(prompt)? {
            Answer::Choice(index) if index < items.len() => Ok(index),
            Answer::Default => Ok(default),
            _ => Err(unexpected(prompt, "valid choice")),
        }
    }

    fn multi_select(&self, prompt: &str, items: &[String]) -> Result<Vec<usize>, PromptError> {
        match self.next(prompt)? {
            Answer::Choices(indices) if indices.iter().all(|i| *i < items.len()) => Ok(indices),
            _ => Err(unexpected(prompt, "list of valid choices")),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        match self.next(prompt)? {
            Answer::Yes(answer) => Ok(answer),
            Answer::Default => Ok(default),
            _ => Err(unexpected(prompt, "yes/no answer")),
        }
    }
}
