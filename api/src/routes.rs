use crate::payloads::{MapsPayload, SearchPayload, TaskPayload};
use crate::responses::{ApiError, TaskResponse};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use grounding_service::{GroundedResponse, QueryDispatcher};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<QueryDispatcher>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/task", post(run_task))
        .route("/search", post(run_search))
        .route("/maps", post(run_maps))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn run_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskResponse>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::EmptyPrompt);
    }

    let prompt = match payload.task {
        Some(task) => task.build_prompt(&payload.prompt),
        None => payload.prompt,
    };

    let text = state.dispatcher.run_generic_task(&prompt, payload.model).await;
    Ok(Json(TaskResponse { text }))
}

async fn run_search(
    State(state): State<AppState>,
    Json(payload): Json<SearchPayload>,
) -> Result<Json<GroundedResponse>, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    Ok(Json(state.dispatcher.run_search_query(&payload.query).await))
}

async fn run_maps(
    State(state): State<AppState>,
    Json(payload): Json<MapsPayload>,
) -> Result<Json<GroundedResponse>, ApiError> {
    if payload.query.trim().is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    let response = state
        .dispatcher
        .run_maps_query(&payload.query, payload.location)
        .await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use grounding_service::query_service::{MAPS_FALLBACK, SEARCH_FALLBACK, TASK_FALLBACK};
    use grounding_service::{BackendError, GeminiBackend, GeminiRequest, GeminiResponse};
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct StubBackend {
        reply: Option<Value>,
        requests: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl GeminiBackend for StubBackend {
        async fn generate_content(
            &self,
            _model: &str,
            request: &GeminiRequest,
        ) -> Result<GeminiResponse, BackendError> {
            self.requests
                .lock()
                .unwrap()
                .push(serde_json::to_value(request).unwrap());
            match &self.reply {
                Some(reply) => Ok(serde_json::from_value(reply.clone())?),
                None => Err(BackendError::Api {
                    status: 500,
                    body: "boom".to_string(),
                }),
            }
        }
    }

    fn app(reply: Option<Value>) -> (Router, Arc<StubBackend>) {
        let backend = Arc::new(StubBackend {
            reply,
            requests: Mutex::new(Vec::new()),
        });
        let state = AppState {
            dispatcher: Arc::new(QueryDispatcher::new(backend.clone())),
        };
        (router(state), backend)
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn grounded_reply() -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Driver X won" }] },
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://a.example", "title": "Race report" } }
                ] }
            }]
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _) = app(None);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn task_wraps_prompt_with_preset() {
        let (app, backend) = app(Some(json!({
            "candidates": [{ "content": { "parts": [{ "text": "short" }] } }]
        })));

        let (status, body) = post_json(
            app,
            "/task",
            json!({ "prompt": "A long text", "task": "summarize", "model": "advanced" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "text": "short" }));

        let requests = backend.requests.lock().unwrap();
        assert_eq!(
            requests[0]["contents"][0]["parts"][0]["text"],
            "Summarize the following text concisely:\n\n---\n\nA long text"
        );
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_locally() {
        let (app, backend) = app(None);
        let (status, body) = post_json(app, "/task", json!({ "prompt": "   " })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "empty_prompt");
        assert_eq!(body["message"], "Please enter some text to analyze.");
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn task_backend_failure_is_reported_as_content() {
        let (app, _) = app(None);
        let (status, body) = post_json(app, "/task", json!({ "prompt": "hello" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], TASK_FALLBACK);
    }

    #[tokio::test]
    async fn search_returns_normalized_sources() {
        let (app, _) = app(Some(grounded_reply()));
        let (status, body) = post_json(app, "/search", json!({ "query": "who won the race" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "text": "Driver X won",
                "sources": [{ "web": { "uri": "https://a.example", "title": "Race report" } }]
            })
        );
    }

    #[tokio::test]
    async fn empty_search_query_is_rejected() {
        let (app, _) = app(None);
        let (status, body) = post_json(app, "/search", json!({ "query": "" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please enter a question.");
    }

    #[tokio::test]
    async fn missing_input_fields_are_rejected_as_empty() {
        for (uri, code) in [("/task", "empty_prompt"), ("/search", "empty_query"), ("/maps", "empty_query")] {
            let (app, backend) = app(None);
            let (status, body) = post_json(app, uri, json!({})).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["error"], code, "{}", uri);
            assert!(backend.requests.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn search_backend_failure_keeps_sources_array() {
        let (app, _) = app(None);
        let (status, body) = post_json(app, "/search", json!({ "query": "q" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "text": SEARCH_FALLBACK, "sources": [] }));
    }

    #[tokio::test]
    async fn maps_without_location_is_rejected() {
        let (app, backend) = app(Some(grounded_reply()));
        let (status, body) = post_json(app, "/maps", json!({ "query": "coffee" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing_location");
        assert_eq!(
            body["message"],
            "Cannot search without your location. Please grant permission and refresh."
        );
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn maps_forwards_location() {
        let (app, backend) = app(Some(grounded_reply()));
        let (status, _) = post_json(
            app,
            "/maps",
            json!({ "query": "coffee", "location": { "latitude": 48.85, "longitude": 2.35 } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let requests = backend.requests.lock().unwrap();
        assert_eq!(
            requests[0]["toolConfig"]["retrievalConfig"]["latLng"],
            json!({ "latitude": 48.85, "longitude": 2.35 })
        );
    }

    #[tokio::test]
    async fn maps_backend_failure_is_reported_as_content() {
        let (app, _) = app(None);
        let (status, body) = post_json(
            app,
            "/maps",
            json!({ "query": "coffee", "location": { "latitude": 1.0, "longitude": 1.0 } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "text": MAPS_FALLBACK, "sources": [] }));
    }
}
