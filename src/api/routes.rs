//! HTTP route handlers for the API

use super::AppState;
use crate::handlers::{
    CreateNote, DeleteNote, NoteDeleted, NoteList, NoteMessage, NoteResult, ReadNotes, UpdateNote,
};
use axum::{body::Bytes, extract::State, response::IntoResponse, Json};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "notes": state.store.len().ok(),
    }))
}

// ============================================================================
// Notes
// ============================================================================
//
// Bodies are taken as raw bytes so that decoding happens inside the traced
// operation: a body that is not a JSON object answers 422, a missing field is an
// unexpected error handled by the tracer policy.

pub async fn create_note(State(state): State<AppState>, body: Bytes) -> NoteResult<Json<NoteMessage>> {
    state.tracer.run::<CreateNote>(&state.store, &body).map(Json)
}

pub async fn read_notes(State(state): State<AppState>) -> NoteResult<Json<NoteList>> {
    state.tracer.run::<ReadNotes>(&state.store, &[]).map(Json)
}

pub async fn update_note(State(state): State<AppState>, body: Bytes) -> NoteResult<Json<NoteMessage>> {
    state.tracer.run::<UpdateNote>(&state.store, &body).map(Json)
}

pub async fn delete_note(State(state): State<AppState>, body: Bytes) -> NoteResult<Json<NoteDeleted>> {
    state.tracer.run::<DeleteNote>(&state.store, &body).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::config::UnexpectedPolicy;
    use crate::store::NoteStore;
    use crate::tracer::OperationTracer;
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState {
            store: Arc::new(NoteStore::new()),
            tracer: OperationTracer::new(UnexpectedPolicy::Respond),
        })
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let body = match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .expect("request"),
            )
            .await
            .expect("response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn create_body(filename: &str, content: &str) -> serde_json::Value {
        serde_json::json!({
            "filename": filename,
            "subject": "s",
            "other_info": "i",
            "content": content,
        })
    }

    #[tokio::test]
    async fn test_end_to_end_note_lifecycle() {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/create_note", Some(create_body("a.txt", "hello"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Note created successfully");
        assert_eq!(body["note"]["content"], "hello");
        let created_ts = body["note"]["timestamp"].as_str().unwrap().to_string();

        let (status, body) = call(&app, Method::GET, "/read_notes", None).await;
        assert_eq!(status, StatusCode::OK);
        let notes = body["notes"].as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["filename"], "a.txt");

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let (status, body) = call(
            &app,
            Method::PUT,
            "/update_note",
            Some(serde_json::json!({ "filename": "a.txt", "content": "bye" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Note updated successfully");
        assert_eq!(body["note"]["content"], "bye");
        assert_eq!(body["note"]["subject"], "s");
        assert_ne!(body["note"]["timestamp"].as_str().unwrap(), created_ts);

        let (status, body) = call(
            &app,
            Method::DELETE,
            "/delete_note",
            Some(serde_json::json!({ "filename": "a.txt" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Note deleted successfully");
        assert_eq!(body["deleted_note"]["content"], "bye");

        let (_, body) = call(&app, Method::GET, "/read_notes", None).await;
        assert!(body["notes"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_create_is_400() {
        let app = app();
        call(&app, Method::POST, "/create_note", Some(create_body("a.txt", "hello"))).await;

        let (status, body) = call(&app, Method::POST, "/create_note", Some(create_body("a.txt", "other"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Note with this filename already exists.");

        let (_, body) = call(&app, Method::GET, "/read_notes", None).await;
        assert_eq!(body["notes"][0]["content"], "hello");
    }

    #[tokio::test]
    async fn test_missing_note_is_404() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::PUT,
            "/update_note",
            Some(serde_json::json!({ "filename": "nope.txt", "content": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Note not found.");

        let (status, _) = call(
            &app,
            Method::DELETE,
            "/delete_note",
            Some(serde_json::json!({ "filename": "nope.txt" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_field_is_500_when_responding() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/create_note",
            Some(serde_json::json!({ "filename": "a.txt" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal Server Error");

        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["notes"], 0);
    }

    #[tokio::test]
    async fn test_non_object_body_is_422_and_service_keeps_serving() {
        let app = app();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/create_note")
                    .body(Body::from("not json"))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = call(
            &app,
            Method::POST,
            "/create_note",
            Some(serde_json::json!({
                "filename": "a.txt",
                "subject": "s",
                "other_info": "i",
                "content": 5,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = call(&app, Method::GET, "/read_notes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["notes"].as_array().unwrap().is_empty());
    }
}
