//! Logging handles shared between a query engine and the conversation layer.
//!
//! A [`Logger`] is the handle an engine hands out and the conversation layer
//! writes model output to. The default implementation forwards to `tracing`;
//! [`init_tracing`] installs a subscriber for binaries and tests that want
//! to see the events.

use tracing_subscriber::EnvFilter;

use crate::config::AgentConfig;

/// Sink for human-readable diagnostic messages.
pub trait Logger: Send + Sync {
    /// Record one message.
    fn log(&self, message: &str);
}

/// [`Logger`] backed by `tracing` events under the `tabletalk` target.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    verbose: bool,
    enabled: bool,
}

impl TracingLogger {
    pub fn new(verbose: bool, enabled: bool) -> Self {
        Self { verbose, enabled }
    }

    /// Build a logger from the `verbose` and `enable_logging` settings.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.verbose, config.enable_logging)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(false, true)
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        if !self.enabled {
            return;
        }
        if self.verbose {
            tracing::info!(target: "tabletalk", "{}", message);
        } else {
            tracing::debug!(target: "tabletalk", "{}", message);
        }
    }
}

/// [`Logger`] that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. Returns `false` if a
/// global subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = AgentConfig {
            verbose: true,
            enable_logging: false,
            ..AgentConfig::default()
        };
        let logger = TracingLogger::from_config(&config);
        assert!(logger.is_verbose());
        assert!(!logger.is_enabled());
    }

    #[test]
    fn test_default_logger_is_quiet_but_enabled() {
        let logger = TracingLogger::default();
        assert!(!logger.is_verbose());
        assert!(logger.is_enabled());
    }

    #[test]
    fn test_loggers_are_object_safe() {
        let loggers: Vec<Box<dyn Logger>> = vec![
            Box::new(TracingLogger::new(true, true)),
            Box::new(TracingLogger::new(false, false)),
            Box::new(NoopLogger),
        ];
        for logger in &loggers {
            logger.log("Clarification Questions: []");
        }
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        let _ = init_tracing("debug");
        assert!(!init_tracing("debug"));
    }
}
