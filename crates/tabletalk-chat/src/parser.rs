//! Parsing of model output into clarification questions.
//!
//! The model is asked for a JSON array of strings. Output is accepted bare
//! or wrapped in a markdown code fence; anything else is a [`ParseError`].
//! Bare JSON wins, so backticks inside question text are left alone.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Upper bound on clarification questions handed back to the caller.
pub const MAX_CLARIFICATION_QUESTIONS: usize = 3;

/// Matches a fenced block such as "```json\n[...]\n```".
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[a-zA-Z]*\s*\n?(.*?)\s*```").expect("Invalid code fence regex")
});

/// Model output that is not a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("model output is not a JSON array of strings")]
    NotAList,
}

/// Parse raw model output as a list of question strings.
pub fn parse_questions(raw: &str) -> Result<Vec<String>, ParseError> {
    let value: Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(bare_err) => {
            let body = fenced_body(raw)
                .ok_or_else(|| ParseError::InvalidJson(bare_err.to_string()))?;
            serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?
        }
    };

    let Value::Array(items) = value else {
        return Err(ParseError::NotAList);
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            _ => Err(ParseError::NotAList),
        })
        .collect()
}

/// Keep the first `MAX_CLARIFICATION_QUESTIONS` questions, in order.
pub fn truncate_questions(mut questions: Vec<String>) -> Vec<String> {
    questions.truncate(MAX_CLARIFICATION_QUESTIONS);
    questions
}

fn fenced_body(raw: &str) -> Option<&str> {
    CODE_FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// =============================================================================
// Tests
// =============================================================================
