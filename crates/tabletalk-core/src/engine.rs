//! Collaborator traits for the conversation layer.
//!
//! - [`QueryEngine`] answers a natural-language question against a
//!   [`DatasetSet`], given the most recent conversation turns.
//! - [`PromptRunner`] sends a rendered [`Prompt`] to a language model and
//!   returns the raw completion text.
//!
//! Both are synchronous: every call blocks until the backend answers.

use std::sync::Arc;

use crate::error::{EngineError, LlmError, PromptError};
use crate::logging::Logger;
use crate::types::{ConversationTurn, DatasetSet, QueryResult};

/// Something that can be rendered into model input.
pub trait Prompt {
    /// Short identifier used in logs ("clarification_questions", "explain").
    fn name(&self) -> &str;

    /// Render the full prompt text.
    fn render(&self) -> Result<String, PromptError>;
}

/// Invokes a language-model backend.
pub trait PromptRunner {
    /// Send the prompt and return the raw completion.
    fn call(&self, prompt: &dyn Prompt) -> Result<String, LlmError>;
}

/// Executes natural-language questions against tabular data.
pub trait QueryEngine {
    /// Answer `query`.
    ///
    /// `output_type` is a caller-supplied hint about the answer shape and is
    /// passed through verbatim. `context` holds prior turns, oldest first.
    fn execute(
        &mut self,
        query: &str,
        output_type: Option<&str>,
        context: &[ConversationTurn],
    ) -> Result<QueryResult, EngineError>;

    /// The code generated for the most recent successful `execute`.
    fn last_executed_artifact(&self) -> Option<&str>;

    /// The datasets this engine was built over.
    fn datasets(&self) -> &DatasetSet;

    /// The engine's logging handle.
    fn logger(&self) -> Arc<dyn Logger>;

    /// The model backend the engine uses, shared with the conversation layer.
    fn prompt_runner(&self) -> &dyn PromptRunner;
}
