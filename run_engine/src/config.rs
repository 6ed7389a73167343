//! Session configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use story_rules::NodeId;
use thiserror::Error;

/// Errors from loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Knobs for a play session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Where a run begins when `start` is called without a node. Ignored if it
    /// does not resolve.
    pub start_node: Option<NodeId>,

    /// Also lock choices whose target node does not exist.
    pub lock_dangling_choices: bool,
}

impl SessionConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn with_start_node(mut self, node: NodeId) -> Self {
        self.start_node = Some(node);
        self
    }

    pub fn with_lock_dangling_choices(mut self, lock: bool) -> Self {
        self.lock_dangling_choices = lock;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.start_node, None);
        assert!(!config.lock_dangling_choices);
    }

    #[test]
    fn test_from_toml() {
        let config = SessionConfig::from_toml_str(
            r#"
            start_node = 4
            lock_dangling_choices = true
            "#,
        )
        .unwrap();

        assert_eq!(config.start_node, Some(NodeId(4)));
        assert!(config.lock_dangling_choices);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SessionConfig::from_toml_str("start_node = 2").unwrap();
        assert_eq!(config, SessionConfig::default().with_start_node(NodeId(2)));
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_bad_toml() {
        let result = SessionConfig::from_toml_str("start_node = \"first\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SessionConfig::load("/definitely/not/here/session.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
