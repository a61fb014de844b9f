use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::ConfigurationError;
use crate::synthesis::RateAdjustment;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Narration voice name (e.g. "pt-BR-FranciscaNeural")
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speech rate adjustment, a signed percentage within [-50%, +50%]
    #[serde(default = "default_rate")]
    pub rate: String,

    /// Maximum characters per chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Whether to translate the extracted text before synthesis
    #[serde(default)]
    pub translate: bool,

    /// Target language code for translation (ISO, region suffix allowed)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Directory the output audio is written into (created if absent)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// External service configuration
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration of the external service clients
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProvidersConfig {
    /// Speech synthesis service
    #[serde(default)]
    pub speech: SpeechProviderConfig,

    /// Translation service
    #[serde(default)]
    pub translation: TranslationProviderConfig,
}

/// Azure Speech service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechProviderConfig {
    /// Subscription key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Azure region the resource lives in (used when no endpoint is set)
    #[serde(default = "default_speech_region")]
    pub region: String,

    /// Service endpoint URL (optional, overrides the region)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            region: default_speech_region(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationProviderConfig {
    /// Service endpoint URL
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_voice() -> String {
    "pt-BR-FranciscaNeural".to_string()
}

fn default_rate() -> String {
    "+5%".to_string()
}

fn default_chunk_size() -> usize {
    300
}

fn default_target_language() -> String {
    "pt".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("audios")
}

fn default_speech_region() -> String {
    "brazilsouth".to_string()
}

fn default_translation_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Validate the configuration for consistency and required values.
    ///
    /// This runs before any pipeline stage; a failure here means no external
    /// call was made and no file was touched.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.chunk_size == 0 {
            return Err(ConfigurationError::InvalidChunkSize);
        }

        if self.voice.trim().is_empty() {
            return Err(ConfigurationError::MissingVoice);
        }

        // Parsing enforces both the pattern and the range
        RateAdjustment::from_str(&self.rate)?;

        if self.translate {
            crate::language_utils::validate_language_code(&self.target_language)?;
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigurationError::MissingOutputDir);
        }

        if self.providers.speech.api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }

        Ok(())
    }

    /// The speech synthesis endpoint, derived from the region when no
    /// explicit endpoint is configured
    pub fn speech_endpoint(&self) -> String {
        if self.providers.speech.endpoint.is_empty() {
            crate::providers::azure_speech::AzureSpeech::endpoint_for_region(
                &self.providers.speech.region,
            )
        } else {
            self.providers.speech.endpoint.clone()
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            voice: default_voice(),
            rate: default_rate(),
            chunk_size: default_chunk_size(),
            translate: false,
            target_language: default_target_language(),
            output_dir: default_output_dir(),
            providers: ProvidersConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
