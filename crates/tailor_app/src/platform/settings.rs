use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tailor_engine::EngineConfig;
use tailor_logging::{tailor_info, tailor_warn};

/// Optional settings file. Every field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub pdf_dir: Option<PathBuf>,
    pub pdf_name: Option<String>,
    pub completion: CompletionOverrides,
    pub converter: ConverterOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionOverrides {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterOverrides {
    pub enabled: Option<bool>,
    pub command: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Missing file means defaults; an unreadable or malformed one is logged and
/// ignored.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            tailor_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            tailor_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            tailor_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

impl Settings {
    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(template) = &self.template {
            config.paths.template = template.clone();
        }
        if let Some(output) = &self.output {
            config.paths.docx = output.clone();
        }
        if let Some(pdf_dir) = &self.pdf_dir {
            config.paths.pdf_dir = pdf_dir.clone();
        }

        let completion = &mut config.completion;
        if let Some(endpoint) = &self.completion.endpoint {
            completion.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.completion.model {
            completion.model = model.clone();
        }
        if let Some(temperature) = self.completion.temperature {
            completion.temperature = temperature;
        }
        if let Some(secs) = self.completion.request_timeout_secs {
            completion.request_timeout = Duration::from_secs(secs);
        }

        let converter = &mut config.converter;
        if let Some(enabled) = self.converter.enabled {
            converter.enabled = enabled;
        }
        if let Some(command) = &self.converter.command {
            converter.command = command.clone();
        }
        if let Some(secs) = self.converter.timeout_secs {
            converter.timeout = Duration::from_secs(secs);
        }
    }
}
