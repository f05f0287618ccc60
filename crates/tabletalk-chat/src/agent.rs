//! Conversation agent: the front door for a multi-turn dialogue over datasets.
//!
//! Owns the conversation memory, forwards questions to a [`QueryEngine`],
//! and sends clarification and explanation prompts straight to the engine's
//! model backend.
//!
//! Failures are reported two ways:
//! - `chat` and `explain` always answer; a collaborator failure becomes the
//!   answer text.
//! - `clarification_questions` returns the collaborator's error unchanged.

use std::fmt;
use std::sync::Arc;

use tabletalk_core::{ConfigSource, DatasetSet, Logger, QueryEngine, QueryResult};
use tracing::debug;
use uuid::Uuid;

use crate::error::AgentError;
use crate::memory::ConversationMemory;
use crate::parser::{parse_questions, truncate_questions};
use crate::prompts::{ClarificationPrompt, ExplainPrompt};

/// Number of prior turns supplied as context when none is configured.
pub const DEFAULT_MEMORY_SIZE: usize = 1;

/// Rows of a tabular answer kept in memory; later turns only see this preview.
const ANSWER_PREVIEW_ROWS: usize = 5;

const CHAT_FAILURE: &str = "get your answers";
const EXPLAIN_FAILURE: &str = "explain";

// =============================================================================
// AgentOptions
// =============================================================================

/// Construction options for a [`ConversationAgent`].
pub struct AgentOptions {
    /// Forwarded untouched to the engine factory.
    pub config: Option<ConfigSource>,
    /// Logger to use; the engine's logger is adopted when absent.
    pub logger: Option<Arc<dyn Logger>>,
    /// How many prior turns accompany each request.
    pub memory_size: usize,
    /// Hard cap on stored turns. Unbounded when absent.
    pub max_history: Option<usize>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            config: None,
            logger: None,
            memory_size: DEFAULT_MEMORY_SIZE,
            max_history: None,
        }
    }
}

impl AgentOptions {
    pub fn with_config(mut self, config: impl Into<ConfigSource>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }
}

// =============================================================================
// ConversationAgent
// =============================================================================

/// Multi-turn conversational front-end over a [`QueryEngine`].
///
/// One agent serves one conversation; it is not meant to be shared between
/// callers.
pub struct ConversationAgent<E: QueryEngine> {
    engine: E,
    memory: ConversationMemory,
    memory_size: usize,
    logger: Arc<dyn Logger>,
    conversation_id: Uuid,
}

impl<E: QueryEngine> ConversationAgent<E> {
    /// Create an agent over one dataset or a list of datasets.
    ///
    /// `connect` builds the engine from the normalized dataset set, the
    /// configuration and the caller's logger, all passed through as given.
    pub fn new<D, F>(datasets: D, options: AgentOptions, connect: F) -> Self
    where
        D: Into<DatasetSet>,
        F: FnOnce(DatasetSet, Option<ConfigSource>, Option<Arc<dyn Logger>>) -> E,
    {
        let AgentOptions {
            config,
            logger,
            memory_size,
            max_history,
        } = options;

        let engine = connect(datasets.into(), config, logger.clone());
        Self::assemble(engine, logger, memory_size, max_history)
    }

    /// Create an agent around an engine that is already built.
    pub fn with_engine(engine: E, memory_size: usize) -> Self {
        Self::assemble(engine, None, memory_size, None)
    }

    fn assemble(
        engine: E,
        logger: Option<Arc<dyn Logger>>,
        memory_size: usize,
        max_history: Option<usize>,
    ) -> Self {
        let logger = logger.unwrap_or_else(|| engine.logger());
        let memory = match max_history {
            Some(max) => ConversationMemory::with_max_turns(max),
            None => ConversationMemory::new(),
        };
        let conversation_id = Uuid::new_v4();
        debug!(
            %conversation_id,
            datasets = engine.datasets().len(),
            memory_size,
            "Conversation agent created"
        );

        Self {
            engine,
            memory,
            memory_size,
            logger,
            conversation_id,
        }
    }

    /// Ask a question about the datasets.
    ///
    /// Never fails: an engine error is turned into an apologetic answer that
    /// quotes it.
    pub fn chat(&mut self, query: &str, output_type: Option<&str>) -> QueryResult {
        let context = self.memory.window(self.memory_size);
        debug!(
            conversation_id = %self.conversation_id,
            context_turns = context.len(),
            "Forwarding query to engine"
        );
        let outcome = self.engine.execute(query, output_type, context);

        self.memory.add_user(query);
        match outcome {
            Ok(result) => {
                self.memory.add_assistant(result.summary(ANSWER_PREVIEW_ROWS));
                result
            }
            Err(e) => {
                debug!(conversation_id = %self.conversation_id, error = %e, "Query failed");
                QueryResult::Text(failure_answer(CHAT_FAILURE, &e))
            }
        }
    }

    /// Questions worth settling before answering, at most three.
    ///
    /// Prompt, backend and parse failures are returned as they came.
    pub fn clarification_questions(&self) -> Result<Vec<String>, AgentError> {
        let prompt = ClarificationPrompt::new(
            self.engine.datasets(),
            self.memory.window(self.memory_size),
        );
        let raw = self.engine.prompt_runner().call(&prompt)?;
        self.logger.log(&format!("Clarification Questions: {}", raw));

        let questions = parse_questions(&raw)?;
        Ok(truncate_questions(questions))
    }

    /// Explain in plain words how the last answer was produced.
    ///
    /// Never fails: a missing artifact or a backend error is turned into an
    /// apologetic answer that quotes it.
    pub fn explain(&self) -> String {
        self.try_explain().unwrap_or_else(|e| {
            debug!(conversation_id = %self.conversation_id, error = %e, "Explanation failed");
            failure_answer(EXPLAIN_FAILURE, &e)
        })
    }

    fn try_explain(&self) -> Result<String, AgentError> {
        let prompt = ExplainPrompt::new(
            self.memory.window(self.memory_size),
            self.engine.last_executed_artifact(),
        )?;
        let response = self.engine.prompt_runner().call(&prompt)?;
        self.logger.log(&format!("Explanation: {}", response));
        Ok(response)
    }

    /// Forget the conversation so far.
    pub fn start_new_conversation(&mut self) {
        self.memory.clear();
        self.conversation_id = Uuid::new_v4();
        debug!(conversation_id = %self.conversation_id, "Started new conversation");
    }

    // -- Accessors --

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn memory_size(&self) -> usize {
        self.memory_size
    }

    pub fn datasets(&self) -> &DatasetSet {
        self.engine.datasets()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Identifier of the current conversation; changes on reset.
    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Code generated for the last successful question, if any.
    pub fn last_executed_artifact(&self) -> Option<&str> {
        self.engine.last_executed_artifact()
    }
}

/// Text returned in place of an answer when an operation fails.
fn failure_answer(action: &str, error: &dyn fmt::Display) -> String {
    format!(
        "Unfortunately, I was not able to {}, because of the following error:\n\n{}\n",
        action, error
    )
}

// =============================================================================
// Tests
// =============================================================================
