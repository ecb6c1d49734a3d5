pub mod config;
pub mod models;
pub mod gemini_service;
pub mod normalizer;
pub mod query_service;

pub use config::{ConfigError, GeminiConfig};
pub use models::*;
pub use gemini_service::{BackendError, GeminiBackend, GeminiService};
pub use query_service::{QueryDispatcher, TaskKind, ValidationError};
