use axum::{http::StatusCode, response::IntoResponse, Json};
use grounding_service::{ErrorResponse, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
pub struct TaskResponse {
    pub text: String,
}

/// Local validation failures, raised before the dispatcher is called.
#[derive(Debug, PartialEq)]
pub enum ApiError {
    EmptyPrompt,
    EmptyQuery,
    Location(ValidationError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::EmptyPrompt => "empty_prompt",
            ApiError::EmptyQuery => "empty_query",
            ApiError::Location(ValidationError::MissingLocation) => "missing_location",
            ApiError::Location(ValidationError::InvalidLocation { .. }) => "invalid_location",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::EmptyPrompt => "Please enter some text to analyze.".to_string(),
            ApiError::EmptyQuery => "Please enter a question.".to_string(),
            ApiError::Location(e) => e.to_string(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Location(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.message(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
