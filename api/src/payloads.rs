use grounding_service::{LatLng, TaskKind, TaskModel};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct TaskPayload {
    #[serde(default)]
    pub prompt: String,
    pub task: Option<TaskKind>, // Preset instruction to wrap the prompt with
    #[serde(default)]
    pub model: TaskModel,
}

#[derive(Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub query: String,
}

#[derive(Deserialize)]
pub struct MapsPayload {
    #[serde(default)]
    pub query: String,
    pub location: Option<LatLng>,
}
