use std::env;
use std::fmt;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Invalid Gemini base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Credential and endpoint for the Gemini backend, read once at startup.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url.into())?;
        Ok(self)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. `GEMINI_API_KEY` wins over
    /// the legacy `API_KEY`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = lookup("GEMINI_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url: normalize_base_url(base_url)?,
        })
    }
}

fn normalize_base_url(base_url: String) -> Result<String, ConfigError> {
    reqwest::Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
        url: base_url.clone(),
        reason: e.to_string(),
    })?;

    Ok(base_url.trim_end_matches('/').to_string())
}
