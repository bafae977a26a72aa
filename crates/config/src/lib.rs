//! Configuration loading and validation for Atelier.
//!
//! Loads the fixed-key JSON object from `atelier.json` in the working
//! directory (or an explicit path). The file is read once at startup;
//! there is no hot reload. Every key has a serde default so a partial or
//! missing file degrades to defaults instead of failing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "atelier.json";

/// Default memory snapshot file name, next to the config.
pub const MEMORY_FILE: &str = "atelier_memory.json";

/// The root configuration structure.
///
/// Maps directly to the `atelier.json` JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Config schema version
    #[serde(default = "default_version")]
    pub version: String,

    /// Entry point name, informational only
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Upper bound on accepted prompt length, in whitespace tokens
    #[serde(default = "default_max_prompt_tokens")]
    pub max_prompt_tokens: u32,

    /// Agents to register, in pipeline order
    #[serde(default = "default_enabled_agents")]
    pub enabled_agents: Vec<String>,

    /// Whether analysis tools are offered to agents
    #[serde(default = "default_true")]
    pub tools_enabled: bool,

    /// Whether `atelier push` actually pushes to the remote
    #[serde(default = "default_true")]
    pub github_push: bool,

    /// Accepted for config compatibility; execution is always sequential
    #[serde(default = "default_true")]
    pub async_mode: bool,

    /// Whether the context store is imported/exported around each command
    #[serde(default = "default_true")]
    pub memory_enabled: bool,

    /// Whether low-confidence results fall back through patterns
    #[serde(default = "default_true")]
    pub pattern_fallback: bool,

    /// Whether `atelier push` commits before pushing
    #[serde(default = "default_true")]
    pub auto_commit: bool,

    /// Forces log level to debug when set
    #[serde(default)]
    pub debug_mode: bool,

    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_version() -> String {
    "1.0".into()
}
fn default_entry() -> String {
    "atelier".into()
}
fn default_max_prompt_tokens() -> u32 {
    8000
}
fn default_enabled_agents() -> Vec<String> {
    vec![
        "design".into(),
        "evaluator".into(),
        "creative".into(),
        "prompt".into(),
    ]
}
fn default_log_level() -> String {
    "info".into()
}
fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            entry: default_entry(),
            max_prompt_tokens: default_max_prompt_tokens(),
            enabled_agents: default_enabled_agents(),
            tools_enabled: true,
            github_push: true,
            async_mode: true,
            memory_enabled: true,
            pattern_fallback: true,
            auto_commit: true,
            debug_mode: false,
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `atelier.json` in the working directory.
    ///
    /// The `ATELIER_LOG` environment variable overrides `log_level`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            tracing::info!(path = %path.display(), "No config file found, using defaults");
            Self::default()
        };

        if let Ok(level) = std::env::var("ATELIER_LOG") {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// The effective log level, honoring `debug_mode`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug_mode { "debug" } else { &self.log_level }
    }

    /// Path of the memory snapshot file next to a given config path.
    pub fn memory_path(config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) if dir != Path::new("") => dir.join(MEMORY_FILE),
            _ => PathBuf::from(MEMORY_FILE),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_prompt_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_prompt_tokens must be greater than 0".into(),
            ));
        }

        const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of {LEVELS:?}, got '{}'",
                self.log_level
            )));
        }

        if self.enabled_agents.is_empty() {
            return Err(ConfigError::ValidationError(
                "enabled_agents must name at least one agent".into(),
            ));
        }

        Ok(())
    }

    /// Generate the default config JSON (for bootstrapping a workspace).
    pub fn default_json() -> String {
        serde_json::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_prompt_tokens, 8000);
        assert_eq!(config.enabled_agents.len(), 4);
        assert!(config.memory_enabled);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/atelier.json")).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(config.pattern_fallback);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"enabled_agents": ["design"], "tools_enabled": false}}"#).unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.enabled_agents, vec!["design".to_string()]);
        assert!(!config.tools_enabled);
        // Untouched keys fall back to defaults
        assert_eq!(config.max_prompt_tokens, 8000);
        assert!(config.memory_enabled);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "this is not json").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn zero_prompt_budget_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_prompt_tokens": 0}}"#).unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn bad_log_level_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "loud"}}"#).unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn debug_mode_wins_over_log_level() {
        let config = AppConfig {
            debug_mode: true,
            log_level: "warn".into(),
            ..AppConfig::default()
        };
        assert_eq!(config.effective_log_level(), "debug");
    }

    #[test]
    fn config_roundtrip_json() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.enabled_agents, config.enabled_agents);
        assert_eq!(parsed.log_level, config.log_level);
    }

    #[test]
    fn memory_path_sits_next_to_config() {
        let path = AppConfig::memory_path(Path::new("/work/atelier.json"));
        assert_eq!(path, PathBuf::from("/work/atelier_memory.json"));

        let bare = AppConfig::memory_path(Path::new("atelier.json"));
        assert_eq!(bare, PathBuf::from("atelier_memory.json"));
    }
}
