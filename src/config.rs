//! Runtime configuration: defaults, then an optional TOML file, then the
//! environment (a `.env` file is honoured).

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SPEECH_RATE: f32 = 1.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {0}")]
    Missing(String),
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub speech_rate: f32,
}

/// Shape of the optional TOML file; every key may be omitted.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_key: Option<String>,
    model: Option<String>,
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    speech_rate: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            speech_rate: DEFAULT_SPEECH_RATE,
        }
    }
}

impl Config {
    /// Loads `.env`, the optional file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        let mut config = Self::default();
        if let Some(api_key) = file.api_key {
            config.api_key = api_key;
        }
        if let Some(model) = file.model {
            config.model = model;
        }
        if let Some(api_url) = file.api_url {
            config.api_url = api_url;
        }
        if let Some(secs) = file.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if let Some(rate) = file.speech_rate {
            config.speech_rate = rate;
        }
        Ok(config)
    }

    /// Overrides fields from variables returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("API_KEY") {
            self.api_key = api_key;
        }
        if let Some(model) = lookup("MODEL") {
            self.model = model;
        }
        if let Some(api_url) = lookup("API_URL") {
            self.api_url = api_url;
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                reason: format!("'{}' is not a whole number of seconds", secs),
            })?;
        }
        if let Some(rate) = lookup("SPEECH_RATE") {
            self.speech_rate = rate.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "SPEECH_RATE",
                reason: format!("'{}' is not a number", rate),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("API_KEY".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "MODEL",
                reason: "must not be empty".to_string(),
            });
        }
        let url = Url::parse(&self.api_url).map_err(|e| ConfigError::Invalid {
            name: "API_URL",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                name: "API_URL",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.1..=10.0).contains(&self.speech_rate) {
            return Err(ConfigError::Invalid {
                name: "SPEECH_RATE",
                reason: format!("{} is outside 0.1..=10", self.speech_rate),
            });
        }
        Ok(())
    }
}
