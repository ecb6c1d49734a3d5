use crate::gemini_service::{BackendError, GeminiBackend};
use crate::models::*;
use crate::normalizer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const TASK_FALLBACK: &str =
    "An error occurred while processing your request. Please check the console for details.";
pub const SEARCH_FALLBACK: &str =
    "An error occurred while fetching search results. Please check the console for details.";
pub const MAPS_FALLBACK: &str = "An error occurred while fetching map data. Please ensure location permissions are enabled and check the console.";

/// Model used for both grounded modes.
pub const GROUNDED_MODEL: TaskModel = TaskModel::Fast;

/// Rejected before any backend call is made.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Cannot search without your location. Please grant permission and refresh.")]
    MissingLocation,

    #[error("Invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },
}

/// Preset instructions for generic text tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Summarize,
    Proofread,
    Keywords,
    Eli5,
}

impl TaskKind {
    pub fn instruction(&self) -> &'static str {
        match self {
            TaskKind::Summarize => "Summarize the following text concisely:",
            TaskKind::Proofread => "Proofread the following text for grammar and spelling errors, providing a corrected version:",
            TaskKind::Keywords => "Extract the main keywords from the following text, providing a comma-separated list:",
            TaskKind::Eli5 => "Explain the following text like I'm 5 years old:",
        }
    }

    pub fn build_prompt(&self, input: &str) -> String {
        format!("{}\n\n---\n\n{}", self.instruction(), input)
    }
}

/// Shapes requests for the three query modes and collapses backend failures
/// into fallback content.
pub struct QueryDispatcher {
    backend: Arc<dyn GeminiBackend>,
}

impl QueryDispatcher {
    pub fn new(backend: Arc<dyn GeminiBackend>) -> Self {
        Self { backend }
    }

    pub async fn run_generic_task(&self, prompt: &str, model: TaskModel) -> String {
        log::info!("Running generic task on {}", model.model_id());

        let request = Self::build_request(prompt, Vec::new(), None);
        self.backend
            .generate_content(model.model_id(), &request)
            .await
            .map(|response| normalizer::normalize(response).text)
            .unwrap_or_else(|e| {
                log::error!("Error in run_generic_task: {}", e);
                TASK_FALLBACK.to_string()
            })
    }

    pub async fn run_search_query(&self, query: &str) -> GroundedResponse {
        log::info!("Running search-grounded query");

        let request = Self::build_request(query, vec![GeminiTool::GoogleSearch {}], None);
        self.grounded(&request)
            .await
            .unwrap_or_else(|e| {
                log::error!("Error in run_search_query: {}", e);
                GroundedResponse::fallback(SEARCH_FALLBACK)
            })
    }

    pub async fn run_maps_query(
        &self,
        query: &str,
        location: Option<LatLng>,
    ) -> Result<GroundedResponse, ValidationError> {
        let location = validate_location(location)?;
        log::info!("Running maps-grounded query");

        let tool_config = GeminiToolConfig {
            retrieval_config: GeminiRetrievalConfig { lat_lng: location },
        };
        let request = Self::build_request(query, vec![GeminiTool::GoogleMaps {}], Some(tool_config));

        Ok(self.grounded(&request).await.unwrap_or_else(|e| {
            log::error!("Error in run_maps_query: {}", e);
            GroundedResponse::fallback(MAPS_FALLBACK)
        }))
    }

    async fn grounded(&self, request: &GeminiRequest) -> Result<GroundedResponse, BackendError> {
        let response = self
            .backend
            .generate_content(GROUNDED_MODEL.model_id(), request)
            .await?;
        let normalized = normalizer::normalize(response);
        log::debug!("Grounded response carried {} sources", normalized.sources.len());
        Ok(normalized)
    }

    fn build_request(
        text: &str,
        tools: Vec<GeminiTool>,
        tool_config: Option<GeminiToolConfig>,
    ) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(text.to_string()),
                }],
            }],
            tools,
            tool_config,
        }
    }
}

fn validate_location(location: Option<LatLng>) -> Result<LatLng, ValidationError> {
    let location = location.ok_or(ValidationError::MissingLocation)?;
    let LatLng { latitude, longitude } = location;

    if !latitude.is_finite()
        || !longitude.is_finite()
        || !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
    {
        return Err(ValidationError::InvalidLocation { latitude, longitude });
    }

    Ok(location)
}
