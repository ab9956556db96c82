use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub openai: OpenAIConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

/// Remote provider settings. The api key is the only credential the service
/// holds and is read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,
    #[serde(default = "default_translation_model")]
    pub translation_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_speech_format")]
    pub speech_format: String,
    #[serde(default = "default_true")]
    pub stream_speech_to_file: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_source_lang")]
    pub default_source_lang: String,
    /// Languages the transcription service cannot take as an explicit hint.
    #[serde(default = "default_auto_detect_languages")]
    pub auto_detect_languages: Vec<String>,
    #[serde(default)]
    pub artifact_dir: Option<PathBuf>,
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_translation_model() -> String {
    "gpt-4".to_string()
}

fn default_speech_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_speech_format() -> String {
    "mp3".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_placeholder() -> String {
    "__TEXT__".to_string()
}

fn default_source_lang() -> String {
    "fr".to_string()
}

fn default_auto_detect_languages() -> Vec<String> {
    vec!["lo".to_string()]
}

fn default_artifact_prefix() -> String {
    "speech_".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            cors_permissive: true,
        }
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            transcription_model: default_transcription_model(),
            translation_model: default_translation_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            speech_format: default_speech_format(),
            stream_speech_to_file: true,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            default_source_lang: default_source_lang(),
            auto_detect_languages: default_auto_detect_languages(),
            artifact_dir: None,
            artifact_prefix: default_artifact_prefix(),
        }
    }
}

impl PipelineConfig {
    pub fn artifact_dir(&self) -> PathBuf {
        self.artifact_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Config {
    /// Load a YAML or JSON config file, expanding `${VAR}` references from the
    /// environment before parsing.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let raw = fs::read_to_string(path)?;
        let content = substitute_env_vars(&raw)?;

        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    /// Configuration used when no file is present: defaults plus the
    /// `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();
        config.apply_env_fallbacks();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_fallbacks(&mut self) {
        if self.openai.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.openai.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let key = self.openai.api_key.trim();
        if key.is_empty() || (key.starts_with("${") && key.ends_with('}')) {
            anyhow::bail!("OpenAI api key is not configured (set OPENAI_API_KEY)");
        }
        if self.pipeline.placeholder.is_empty() {
            anyhow::bail!("pipeline.placeholder must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("server.port must be non-zero");
        }
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables are
/// left as written.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
