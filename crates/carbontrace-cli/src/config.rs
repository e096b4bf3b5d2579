//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use carbontrace_emissions::FactorTable;
use carbontrace_extractor::ExtractorConfig;
use carbontrace_llm::{gemini, ollama, GeminiProvider, MockProvider, OllamaProvider, Provider};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Directory under the home directory holding config, log and history
const APP_DIR: &str = ".carbontrace";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Custom factor table (TOML); the built-in table when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors_path: Option<PathBuf>,

    /// Activity log (JSON lines); `~/.carbontrace/activities.jsonl` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// AI provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Extraction limits and timeout
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which AI provider to call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// Local Ollama instance
    Ollama {
        /// Base URL
        #[serde(default = "default_ollama_endpoint")]
        endpoint: String,
        /// Model name
        #[serde(default = "default_ollama_model")]
        model: String,
        /// Retries for transient failures
        #[serde(default = "default_max_retries")]
        max_retries: u32,
    },

    /// Google Gemini
    Gemini {
        /// Model name
        #[serde(default = "default_gemini_model")]
        model: String,
        /// Environment variable holding the API key
        #[serde(default = "default_api_key_env")]
        api_key_env: String,
        /// Retries for transient failures
        #[serde(default = "default_max_retries")]
        max_retries: u32,
    },

    /// Fixed response, for offline demos and tests
    Mock {
        /// Completion returned for every prompt
        response: String,
    },
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// User id stamped on saved records
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// The application directory (`~/.carbontrace`).
    pub fn app_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(APP_DIR))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::path()?,
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        if self.settings.user_id.trim().is_empty() {
            return Err(CliError::Config("settings.user_id cannot be empty".into()));
        }
        Ok(())
    }

    /// Construct the configured provider.
    pub fn build_provider(&self) -> Result<Provider> {
        let provider: Provider = match &self.provider {
            ProviderConfig::Ollama {
                endpoint,
                model,
                max_retries,
            } => OllamaProvider::new(endpoint.as_str(), model.as_str())
                .with_max_retries(*max_retries)
                .into(),
            ProviderConfig::Gemini {
                model,
                api_key_env,
                max_retries,
            } => GeminiProvider::from_env(model.as_str(), api_key_env)?
                .with_max_retries(*max_retries)
                .into(),
            ProviderConfig::Mock { response } => MockProvider::new(response.as_str()).into(),
        };
        Ok(provider)
    }

    /// Load the configured factor table.
    pub fn factor_table(&self) -> Result<Arc<FactorTable>> {
        match &self.factors_path {
            Some(path) => Ok(Arc::new(FactorTable::from_file(path)?)),
            None => Ok(FactorTable::builtin()),
        }
    }

    /// Resolve the activity log path.
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::app_dir()?.join("activities.jsonl")),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Ollama {
            endpoint: default_ollama_endpoint(),
            model: default_ollama_model(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            user_id: default_user_id(),
        }
    }
}

fn default_ollama_endpoint() -> String {
    ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_ollama_model() -> String {
    ollama::DEFAULT_MODEL.to_string()
}

fn default_gemini_model() -> String {
    gemini::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    ollama::DEFAULT_MAX_RETRIES
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_user_id() -> String {
    "local".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbontrace_domain::traits::LlmProvider;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.user_id, "local");
        assert!(config.factors_path.is_none());
        match config.provider {
            ProviderConfig::Ollama { endpoint, model, .. } => {
                assert_eq!(endpoint, "http://localhost:11434");
                assert_eq!(model, "llama3.1");
            }
            other => panic!("Expected Ollama, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_parse_gemini_provider() {
        let config: Config = toml::from_str(
            r#"
            [provider]
            kind = "gemini"
            model = "gemini-2.5-pro"

            [extractor]
            min_text_length = 10

            [settings]
            format = "json"
            user_id = "alice"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.provider,
            ProviderConfig::Gemini {
                model: "gemini-2.5-pro".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                max_retries: 3,
            }
        );
        assert_eq!(config.extractor.min_text_length, 10);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.provider = ProviderConfig::Mock {
            response: "{}".to_string(),
        };
        config.log_path = Some(dir.path().join("log.jsonl"));
        config.save_to(&path).unwrap();

        let loaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.provider, config.provider);
        assert_eq!(loaded.log_path, config.log_path);
    }

    #[test]
    fn test_invalid_extractor_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[extractor]\nextraction_timeout_secs = 0\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_build_mock_provider() {
        let mut config = Config::default();
        config.provider = ProviderConfig::Mock {
            response: "canned".to_string(),
        };
        let provider = config.build_provider().unwrap();
        assert_eq!(provider.model_name(), "mock");
    }

    #[test]
    fn test_factor_table_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("factors.toml");
        fs::write(
            &path,
            "[[factors]]\nid = \"tea\"\nname = \"tea\"\nvalue = 1.5\nunit = \"kg\"\ndescription = \"Tea\"\n",
        )
        .unwrap();

        let mut config = Config::default();
        assert_eq!(config.factor_table().unwrap().len(), 23);

        config.factors_path = Some(path);
        let table = config.factor_table().unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.lookup("tea").is_some());
    }
}
