//! Error types for the conversation layer.

use tabletalk_core::{LlmError, PromptError};

use crate::parser::ParseError;

/// Errors surfaced by operations that do not contain their failures.
///
/// Each variant carries the collaborator's error unchanged as its source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_transparent() {
        let err: AgentError = LlmError::Backend("timeout".to_string()).into();
        assert_eq!(err.to_string(), "LLM backend error: timeout");

        let err: AgentError = ParseError::NotAList.into();
        assert_eq!(err.to_string(), "model output is not a JSON array of strings");
    }

    #[test]
    fn test_from_conversions_keep_original() {
        let original = LlmError::RateLimited;
        let err = AgentError::from(original.clone());
        assert_eq!(err, AgentError::Llm(original));

        let err = AgentError::from(PromptError::MissingArtifact);
        assert!(matches!(err, AgentError::Prompt(PromptError::MissingArtifact)));
    }
}
