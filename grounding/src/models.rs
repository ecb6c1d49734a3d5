use serde::{Deserialize, Deserializer, Serialize};

/// Model selector for generic tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskModel {
    #[default]
    Fast,
    Advanced,
}

impl TaskModel {
    pub fn model_id(&self) -> &'static str {
        match self {
            TaskModel::Fast => "gemini-2.5-flash",
            TaskModel::Advanced => "gemini-2.5-pro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSnippet {
    pub uri: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSource {
    pub uri: String,
    pub title: String,
    #[serde(default)]
    pub review_snippets: Vec<ReviewSnippet>,
}

/// A citation attached to a grounded answer.
///
/// Exactly one of `web` or `place` is expected, but a source with neither is
/// kept as-is; `link()` returns `None` for it and consumers skip it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<PlaceSource>,
}

/// Link data shared by both source kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLink<'a> {
    pub uri: &'a str,
    pub title: &'a str,
}

impl Source {
    pub fn link(&self) -> Option<SourceLink<'_>> {
        if let Some(web) = &self.web {
            return Some(SourceLink { uri: &web.uri, title: &web.title });
        }
        self.place
            .as_ref()
            .map(|place| SourceLink { uri: &place.uri, title: &place.title })
    }

    pub fn review_snippets(&self) -> &[ReviewSnippet] {
        self.place
            .as_ref()
            .map(|place| place.review_snippets.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundedResponse {
    pub text: String,
    pub sources: Vec<Source>,
}

impl GroundedResponse {
    pub fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sources: Vec::new(),
        }
    }
}

// Gemini generateContent wire types.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<GeminiTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<GeminiToolConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeminiTool {
    #[serde(rename = "googleSearch")]
    GoogleSearch {},
    #[serde(rename = "googleMaps")]
    GoogleMaps {},
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiToolConfig {
    pub retrieval_config: GeminiRetrievalConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRetrievalConfig {
    pub lat_lng: LatLng,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GeminiGroundingMetadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Option<Vec<GeminiGroundingChunk>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiGroundingChunk {
    #[serde(default)]
    pub web: Option<GeminiWebChunk>,
    #[serde(default)]
    pub maps: Option<GeminiMapsChunk>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiWebChunk {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiMapsChunk {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub place_answer_sources: Vec<GeminiPlaceAnswerSources>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPlaceAnswerSources {
    #[serde(default)]
    pub review_snippets: Vec<GeminiReviewSnippet>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GeminiReviewSnippet {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

// The REST API sends `placeAnswerSources` as an object, the JS SDK typings as a list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<GeminiPlaceAnswerSources>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<GeminiPlaceAnswerSources>),
        One(GeminiPlaceAnswerSources),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(single) => vec![single],
        OneOrMany::Null(()) => Vec::new(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
