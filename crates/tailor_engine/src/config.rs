use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::fill::FillOptions;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Please set your {0} environment variable.")]
    MissingCredential(String),
}

/// Bearer credential for the completion endpoint. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn from_env(var: &str) -> Result<Self, ConfigError> {
        std::env::var(var)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ConfigError::MissingCredential(var.to_string()))
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub api_key: ApiKey,
}

impl CompletionSettings {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            api_key,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConverterSettings {
    pub enabled: bool,
    pub command: String,
    pub timeout: Duration,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "soffice".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub template: PathBuf,
    pub docx: PathBuf,
    /// Directory the user-named PDF is written into.
    pub pdf_dir: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            template: PathBuf::from("resume_template.docx"),
            docx: PathBuf::from("output_resume.docx"),
            pdf_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub completion: CompletionSettings,
    pub converter: ConverterSettings,
    pub paths: OutputPaths,
    pub fill: FillOptions,
}

impl EngineConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            completion: CompletionSettings::new(api_key),
            converter: ConverterSettings::default(),
            paths: OutputPaths::default(),
            fill: FillOptions::default(),
        }
    }

    /// Fails fast when the credential variable is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ApiKey::from_env(API_KEY_ENV)?))
    }
}
