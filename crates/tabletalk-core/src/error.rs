use thiserror::Error;

/// Top-level error type for configuration and serialization concerns.
///
/// Collaborator-facing failures (model backend, query engine, prompt
/// construction) have their own types below so callers can match on the
/// boundary that failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by a language-model backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    #[error("LLM backend error: {0}")]
    Backend(String),

    #[error("LLM rate limit exceeded")]
    RateLimited,

    #[error("LLM returned an empty response")]
    EmptyResponse,
}

/// Errors raised by a query engine while answering a question.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("query engine backend error: {0}")]
    Backend(String),

    #[error("code execution failed: {0}")]
    Execution(String),

    #[error("malformed result: {0}")]
    MalformedResult(String),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Errors raised while building a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("no code has been executed yet in this conversation")]
    MissingArtifact,

    #[error("prompt rendering failed: {0}")]
    Render(String),
}
