use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::{CoreError, Result};

/// Configuration handed to a query engine.
///
/// Loaded from a TOML file or built from a raw key/value map. The
/// conversation layer never inspects these values; they are forwarded to
/// whichever engine the caller wires up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model backend selection.
    pub llm: LlmConfig,
    /// Run generated code in a restricted environment.
    pub enable_sandbox: bool,
    /// Default output-type hint ("string", "number", "dataframe", "plot").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,
    /// Emit every logged message at info level instead of debug.
    pub verbose: bool,
    /// Whether the logger built from this config emits anything at all.
    pub enable_logging: bool,
    /// Engine-specific keys this crate does not know about.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            enable_sandbox: true,
            output_type: None,
            verbose: false,
            enable_logging: true,
            extra: BTreeMap::new(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AgentConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Build a configuration from loose key/value pairs.
    ///
    /// Missing keys take their defaults; unknown keys land in `extra`.
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

/// Language-model backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name, e.g. "openai" or "azure".
    pub provider: String,
    /// Model name; the provider default is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            temperature: 0.0,
        }
    }
}

/// Configuration as supplied by the caller: already structured, or raw.
///
/// The conversation layer passes this through untouched; the engine decides
/// when (and whether) to [`resolve`](ConfigSource::resolve) it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Structured(AgentConfig),
    Raw(Map<String, Value>),
}

impl ConfigSource {
    /// Turn the source into a typed configuration.
    pub fn resolve(self) -> Result<AgentConfig> {
        match self {
            ConfigSource::Structured(config) => Ok(config),
            ConfigSource::Raw(map) => AgentConfig::from_map(map),
        }
    }
}

impl From<AgentConfig> for ConfigSource {
    fn from(config: AgentConfig) -> Self {
        ConfigSource::Structured(config)
    }
}

impl From<Map<String, Value>> for ConfigSource {
    fn from(map: Map<String, Value>) -> Self {
        ConfigSource::Raw(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write `content` as `tabletalk.toml` in a fresh directory.
    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabletalk.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.llm.provider, "openai");
        assert!(config.llm.model.is_none());
        assert!(config.enable_sandbox);
        assert!(config.enable_logging);
        assert!(!config.verbose);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
enable_sandbox = false
output_type = "dataframe"
verbose = true

[llm]
provider = "azure"
model = "gpt-4o"
temperature = 0.2
"#;
        let (_dir, path) = write_config(content);
        let config = AgentConfig::load(&path).unwrap();
        assert_eq!(config.llm.provider, "azure");
        assert_eq!(config.llm.model.as_deref(), Some("gpt-4o"));
        assert!(!config.enable_sandbox);
        assert_eq!(config.output_type.as_deref(), Some("dataframe"));
        assert!(config.verbose);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
verbose = true
"#;
        let (_dir, path) = write_config(content);
        let config = AgentConfig::load(&path).unwrap();
        assert!(config.verbose);
        // Remaining fields use defaults
        assert_eq!(config.llm.provider, "openai");
        assert!(config.enable_sandbox);
    }

    #[test]
    fn test_unknown_keys_kept_in_extra() {
        let content = r#"
max_retries = 3
save_charts = true
"#;
        let (_dir, path) = write_config(content);
        let config = AgentConfig::load(&path).unwrap();
        assert_eq!(config.extra.get("max_retries"), Some(&json!(3)));
        assert_eq!(config.extra.get("save_charts"), Some(&json!(true)));
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let (_dir, path) = write_config("verbose = [[[");
        let err = AgentConfig::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_load_or_default_unparsable_file() {
        let (_dir, path) = write_config("[llm]\nprovider = 7");
        assert_eq!(AgentConfig::load_or_default(&path), AgentConfig::default());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AgentConfig::load_or_default(Path::new("/nonexistent/tabletalk.toml"));
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tabletalk.toml");

        let config = AgentConfig {
            verbose: true,
            output_type: Some("number".to_string()),
            ..AgentConfig::default()
        };
        config.save(&path).unwrap();

        let reloaded = AgentConfig::load(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    // ---- Raw key/value form ----

    #[test]
    fn test_from_map() {
        let map = json!({
            "llm": { "provider": "local", "temperature": 0.7 },
            "enable_sandbox": false,
            "custom_whitelisted_dependencies": ["scipy"],
        });
        let Value::Object(map) = map else {
            panic!("expected object");
        };

        let config = AgentConfig::from_map(map).unwrap();
        assert_eq!(config.llm.provider, "local");
        assert_eq!(config.llm.temperature, 0.7);
        assert!(!config.enable_sandbox);
        assert_eq!(
            config.extra.get("custom_whitelisted_dependencies"),
            Some(&json!(["scipy"]))
        );
    }

    #[test]
    fn test_from_map_wrong_type_is_serialization_error() {
        let Value::Object(map) = json!({ "verbose": "loud" }) else {
            panic!("expected object");
        };
        let err = AgentConfig::from_map(map).unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[test]
    fn test_config_source_resolve() {
        let structured = ConfigSource::from(AgentConfig::default());
        assert_eq!(structured.resolve().unwrap(), AgentConfig::default());

        let raw = ConfigSource::from(Map::new());
        assert_eq!(raw.resolve().unwrap(), AgentConfig::default());
    }
}
