use serde::Deserialize;
use std::path::Path;

use super::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// take priority over environment variables.
///
/// # Example YAML structure
/// ```yaml
/// playht:
///   api_key: "your-api-key"
///   user_id: "your-user-id"
///   default_voice_engine: "Play3.0-mini"
///
/// debug:
///   enabled: true
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub playht: Option<PlayHtYaml>,
    pub debug: Option<DebugYaml>,
}

/// Play.ht credentials and defaults from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PlayHtYaml {
    pub api_key: Option<String>,
    pub user_id: Option<String>,
    pub default_voice_engine: Option<String>,
}

/// Debug logging configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DebugYaml {
    pub enabled: Option<bool>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse YAML configuration from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(ConfigError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
playht:
  api_key: "yaml-key"
  user_id: "yaml-user"
  default_voice_engine: "PlayDialog-turbo"

debug:
  enabled: true
"#;

        let config = YamlConfig::from_str(yaml).unwrap();
        let playht = config.playht.unwrap();

        assert_eq!(playht.api_key.as_deref(), Some("yaml-key"));
        assert_eq!(playht.user_id.as_deref(), Some("yaml-user"));
        assert_eq!(playht.default_voice_engine.as_deref(), Some("PlayDialog-turbo"));
        assert_eq!(config.debug.unwrap().enabled, Some(true));
    }

    #[test]
    fn test_yaml_config_empty_document() {
        let config = YamlConfig::from_str("").unwrap();
        assert!(config.playht.is_none());
        assert!(config.debug.is_none());
    }

    #[test]
    fn test_yaml_config_partial_section() {
        let config = YamlConfig::from_str("playht:\n  user_id: only-user\n").unwrap();
        let playht = config.playht.unwrap();

        assert!(playht.api_key.is_none());
        assert_eq!(playht.user_id.as_deref(), Some("only-user"));
    }

    #[test]
    fn test_yaml_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "debug:\n  enabled: false\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(config.debug.unwrap().enabled, Some(false));
    }

    #[test]
    fn test_yaml_config_invalid() {
        let result = YamlConfig::from_str("playht: [unterminated");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
