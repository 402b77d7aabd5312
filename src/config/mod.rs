//! SDK settings
//!
//! This module holds the settings every request reads: credentials, debug
//! logging, and the optional transport override. Settings come from
//! environment variables, a YAML file, or are built in code.
//! Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Example
//! ```rust,no_run
//! use playht_stream::config::SdkSettings;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let settings = SdkSettings::from_env()?;
//!
//! // Load from YAML file with environment variable fallbacks
//! let settings = SdkSettings::from_file(&PathBuf::from("playht.yaml"))?;
//! # Ok(())
//! # }
//! ```

use std::env;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::core::tts::playht::{HttpTransport, PlayHtModel};

mod yaml;

pub use yaml::{DebugYaml, PlayHtYaml, YamlConfig};

/// Environment variable holding the Play.ht API key.
pub const ENV_API_KEY: &str = "PLAYHT_API_KEY";
/// Environment variable holding the Play.ht user ID.
pub const ENV_USER_ID: &str = "PLAYHT_USER_ID";
/// Environment variable selecting the default voice engine.
pub const ENV_VOICE_ENGINE: &str = "PLAYHT_VOICE_ENGINE";
/// Environment variable enabling debug request logging.
pub const ENV_DEBUG: &str = "PLAYHT_DEBUG";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Play.ht API key not configured (set PLAYHT_API_KEY or playht.api_key)")]
    MissingApiKey,

    #[error("Play.ht user ID not configured (set PLAYHT_USER_ID or playht.user_id)")]
    MissingUserId,

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Receives formatted debug lines instead of the default `tracing` output.
pub type DebugSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Debug request logging.
#[derive(Clone, Default)]
pub struct DebugSettings {
    /// Emit one line per request when set
    pub enabled: bool,
    /// Custom destination for the lines
    pub sink: Option<DebugSink>,
}

impl DebugSettings {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            sink: None,
        }
    }

    /// Enabled, with lines routed to `sink`.
    pub fn with_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            enabled: true,
            sink: Some(Arc::new(sink)),
        }
    }
}

impl std::fmt::Debug for DebugSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugSettings")
            .field("enabled", &self.enabled)
            .field("sink", &self.sink.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Advanced settings.
#[derive(Clone, Default)]
pub struct AdvancedSettings {
    /// Transport used instead of the shared default client
    pub http_client: Option<Arc<dyn HttpTransport>>,
}

impl std::fmt::Debug for AdvancedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvancedSettings")
            .field("http_client", &self.http_client.as_ref().map(|c| c.name()))
            .finish()
    }
}

/// Settings read by every request.
#[derive(Clone, Default)]
pub struct SdkSettings {
    pub api_key: String,
    pub user_id: String,
    /// Engine applied by [`PlayHtClient`](crate::PlayHtClient) when options carry none
    pub default_voice_engine: Option<PlayHtModel>,
    pub debug: DebugSettings,
    pub advanced: AdvancedSettings,
}

impl std::fmt::Debug for SdkSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkSettings")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("default_voice_engine", &self.default_voice_engine)
            .field("debug", &self.debug)
            .field("advanced", &self.advanced)
            .finish()
    }
}

impl SdkSettings {
    pub fn new(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_debug(mut self, debug: DebugSettings) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_http_client(mut self, client: Arc<dyn HttpTransport>) -> Self {
        self.advanced.http_client = Some(client);
        self
    }

    pub fn with_default_voice_engine(mut self, engine: PlayHtModel) -> Self {
        self.default_voice_engine = Some(engine);
        self
    }

    /// Load settings from environment variables
    ///
    /// `.env` files are loaded by the binary before this runs; here only the
    /// process environment is read.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_yaml(YamlConfig::default())
    }

    /// Load settings from a YAML file with environment variable fallbacks
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - A value has an invalid format
    /// - Credentials are missing from both sources
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = YamlConfig::from_file(path)?;
        Self::from_yaml(yaml)
    }

    /// Merge a parsed YAML document over the environment and validate.
    pub fn from_yaml(yaml: YamlConfig) -> Result<Self, ConfigError> {
        let playht = yaml.playht.unwrap_or_default();
        let debug = yaml.debug.unwrap_or_default();

        let api_key = playht.api_key.or_else(|| env_var(ENV_API_KEY));
        let user_id = playht.user_id.or_else(|| env_var(ENV_USER_ID));

        let default_voice_engine = match playht
            .default_voice_engine
            .or_else(|| env_var(ENV_VOICE_ENGINE))
        {
            Some(raw) => Some(PlayHtModel::parse(&raw).ok_or(ConfigError::InvalidValue {
                field: "default_voice_engine",
                value: raw,
            })?),
            None => None,
        };

        let debug_enabled = match debug.enabled {
            Some(enabled) => enabled,
            None => match env_var(ENV_DEBUG) {
                Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                    field: ENV_DEBUG,
                    value: raw,
                })?,
                None => false,
            },
        };

        let settings = Self {
            api_key: api_key.unwrap_or_default(),
            user_id: user_id.unwrap_or_default(),
            default_voice_engine,
            debug: DebugSettings {
                enabled: debug_enabled,
                sink: None,
            },
            advanced: AdvancedSettings::default(),
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Checks that both credentials are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::MissingUserId);
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    // Helper to clean up environment variables
    fn cleanup_env_vars() {
        unsafe {
            env::remove_var(ENV_API_KEY);
            env::remove_var(ENV_USER_ID);
            env::remove_var(ENV_VOICE_ENGINE);
            env::remove_var(ENV_DEBUG);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_reads_all_variables() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_API_KEY, "env-key");
            env::set_var(ENV_USER_ID, "env-user");
            env::set_var(ENV_VOICE_ENGINE, "PlayDialog-turbo");
            env::set_var(ENV_DEBUG, "true");
        }

        let settings = SdkSettings::from_env().unwrap();

        assert_eq!(settings.api_key, "env-key");
        assert_eq!(settings.user_id, "env-user");
        assert_eq!(
            settings.default_voice_engine,
            Some(PlayHtModel::PlayDialogTurbo)
        );
        assert!(settings.debug.enabled);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_credentials() {
        cleanup_env_vars();

        assert!(matches!(
            SdkSettings::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        unsafe {
            env::set_var(ENV_API_KEY, "env-key");
        }
        assert!(matches!(
            SdkSettings::from_env(),
            Err(ConfigError::MissingUserId)
        ));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_debug_flag() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_API_KEY, "env-key");
            env::set_var(ENV_USER_ID, "env-user");
            env::set_var(ENV_DEBUG, "maybe");
        }

        let err = SdkSettings::from_env().unwrap_err();
        assert!(err.to_string().contains("PLAYHT_DEBUG"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_voice_engine() {
        cleanup_env_vars();
        unsafe {
            env::set_var(ENV_API_KEY, "env-key");
            env::set_var(ENV_USER_ID, "env-user");
            env::set_var(ENV_VOICE_ENGINE, "Play9000");
        }

        let err = SdkSettings::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "default_voice_engine",
                ..
            }
        ));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_yaml_overrides_env() {
        cleanup_env_vars();

        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("playht.yaml");
        fs::write(
            &config_path,
            "playht:\n  api_key: \"yaml-key\"\ndebug:\n  enabled: false\n",
        )
        .unwrap();

        unsafe {
            env::set_var(ENV_API_KEY, "env-key");
            env::set_var(ENV_USER_ID, "env-user");
            env::set_var(ENV_DEBUG, "1");
        }

        let settings = SdkSettings::from_file(&config_path).unwrap();

        // YAML overrides ENV
        assert_eq!(settings.api_key, "yaml-key");
        assert!(!settings.debug.enabled);
        // ENV fills what YAML leaves out
        assert_eq!(settings.user_id, "env-user");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_file_missing_file() {
        cleanup_env_vars();

        let result = SdkSettings::from_file(Path::new("/nonexistent/playht.yaml"));

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let settings = SdkSettings::new("super-secret", "user-1");
        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("user-1"));
    }

    #[test]
    fn test_validate_rejects_blank_credentials() {
        assert!(SdkSettings::new("key", "user").validate().is_ok());
        assert!(matches!(
            SdkSettings::new("  ", "user").validate(),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            SdkSettings::new("key", "").validate(),
            Err(ConfigError::MissingUserId)
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
