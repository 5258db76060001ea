use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    foundation::error::{MemeError, MemeResult},
    text::font::FontSource,
};

/// Environment variables consulted, in order, by [`Config::with_env_api_key`].
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration. Every field has a default, so a JSON file may set only a subset.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Read a JSON configuration file.
    pub fn from_path(path: &Path) -> MemeResult<Self> {
        let f = File::open(path).map_err(|e| {
            MemeError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            MemeError::validation(format!("parse config '{}': {e}", path.display()))
        })
    }

    /// Fill an empty API key from the environment; an explicit key always wins.
    pub fn with_env_api_key(mut self) -> Self {
        if self.service.api_key.trim().is_empty() {
            if let Some(key) = API_KEY_ENV_VARS
                .iter()
                .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            {
                self.service.api_key = key;
            }
        }
        self
    }
}

/// Settings for the captioning backend client.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    /// Model used for captions and image analysis.
    pub text_model: String,
    /// Model used for image edits and generation.
    pub image_model: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ServiceConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Settings for caption rendering.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font file overriding the system caption font chain.
    pub font_path: Option<PathBuf>,
}

impl RenderConfig {
    pub fn font_source(&self) -> FontSource {
        match &self.font_path {
            Some(path) => FontSource::File(path.clone()),
            None => FontSource::System,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
