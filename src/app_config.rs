/*!
 * Application configuration module.
 *
 * Handles loading, validating and saving configuration settings.
 */

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use url::Url;

use crate::language_utils::TargetLanguage;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language selector; the source language is implied
    #[serde(default)]
    pub target_language: TargetLanguage,

    /// Remote service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Batching and eligibility settings
    #[serde(default)]
    pub batching: BatchingConfig,

    /// Input/output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Remote translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    // @field: OpenAI-compatible base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key; when empty the key is read from `api_key_env`
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Minimum delay in milliseconds between the end of one remote call
    /// and the start of the next
    #[serde(default = "default_api_delay_ms")]
    pub api_delay_ms: u64,

    /// Per-attempt request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per batch, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Upper bound for a single backoff wait
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Segment delimiter used to pack a batch into one request
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            api_delay_ms: default_api_delay_ms(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            delimiter: default_delimiter(),
        }
    }
}

/// Batching and eligibility configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchingConfig {
    /// Maximum number of fragments in one request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Minimum meaningful characters for a value to be worth translating
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            min_chars: default_min_chars(),
        }
    }
}

/// Filesystem locations used by a run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PathsConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// System instruction template; created with the built-in default if missing
    #[serde(default = "default_system_prompt_file")]
    pub system_prompt_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            system_prompt_file: default_system_prompt_file(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai/".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_api_delay_ms() -> u64 {
    2000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_max_backoff_ms() -> u64 {
    30_000
}

fn default_delimiter() -> String {
    "|||".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_min_chars() -> usize {
    2
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_system_prompt_file() -> PathBuf {
    PathBuf::from("system-prompt.txt")
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: TargetLanguage::default(),
            translation: TranslationConfig::default(),
            batching: BatchingConfig::default(),
            paths: PathsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load the configuration file, or write the defaults there and use them
    ///
    /// Returns the config and whether it was freshly created.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok((config, false));
        }

        let config = Config::default();
        config.save(path)?;
        Ok((config, true))
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.batching.batch_size == 0 {
            return Err(anyhow!("batching.batch_size must be a positive integer"));
        }

        if self.translation.max_attempts == 0 {
            return Err(anyhow!("translation.max_attempts must be at least 1"));
        }

        if self.translation.model.trim().is_empty() {
            return Err(anyhow!("translation.model cannot be empty"));
        }

        if self.translation.delimiter.is_empty() {
            return Err(anyhow!("translation.delimiter cannot be empty"));
        }

        let url = Url::parse(&self.translation.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.translation.endpoint))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow!("Endpoint must use http or https: {}", self.translation.endpoint));
        }

        Ok(())
    }

    /// Resolve the API credential from the config or the environment
    pub fn resolve_api_key(&self) -> Result<String> {
        if !self.translation.api_key.trim().is_empty() {
            return Ok(self.translation.api_key.trim().to_string());
        }

        match std::env::var(&self.translation.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(anyhow!(
                "API key is required: set translation.api_key or the {} environment variable",
                self.translation.api_key_env
            )),
        }
    }
}
