//! Conversational interface over a dataframe query engine.
//!
//! Holds a multi-turn dialogue about one or more datasets: questions go to a
//! query engine, clarification and explanation requests go straight to its
//! model backend, and the last few turns travel along as context.

pub mod agent;
pub mod error;
pub mod memory;
pub mod parser;
pub mod prompts;

pub use agent::{AgentOptions, ConversationAgent, DEFAULT_MEMORY_SIZE};
pub use error::AgentError;
pub use memory::ConversationMemory;
pub use parser::{parse_questions, ParseError, MAX_CLARIFICATION_QUESTIONS};
pub use prompts::{ClarificationPrompt, ExplainPrompt};
