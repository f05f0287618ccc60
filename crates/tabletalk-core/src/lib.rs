pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{AgentConfig, ConfigSource, LlmConfig};
pub use engine::{Prompt, PromptRunner, QueryEngine};
pub use error::{CoreError, EngineError, LlmError, PromptError, Result};
pub use logging::{init_tracing, Logger, NoopLogger, TracingLogger};
pub use types::*;
