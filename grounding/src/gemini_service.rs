use crate::config::GeminiConfig;
use crate::models::*;
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Any failure of a single generateContent call.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Gemini API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed Gemini response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs are dropped from transport errors so they never reach the logs.
        BackendError::Network(e.without_url())
    }
}

#[async_trait]
pub trait GeminiBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, BackendError>;
}

pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }
}

#[async_trait]
impl GeminiBackend for GeminiService {
    async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, BackendError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
