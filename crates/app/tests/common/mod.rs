//! In-process RepoHub stub used by the integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

/// How the stub deviates from a healthy RepoHub server.
#[derive(Debug, Clone, Default)]
pub struct StubBehavior {
    /// CORS header left out of the preflight response.
    pub omit_cors_header: Option<&'static str>,
    /// Body returned by `GET /api/submissions` instead of an empty array.
    pub submissions_body: Option<Value>,
}

const CORS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("access-control-allow-headers", "Content-Type, Authorization"),
];

fn router(behavior: StubBehavior) -> Router {
    Router::new()
        .route("/api", get(root).options(preflight))
        .route("/api/submissions", get(submissions).post(unauthorized))
        .route("/api/comments", get(comments).post(unauthorized))
        .route("/api/comments/{id}", put(unauthorized).delete(unauthorized))
        .fallback(not_found)
        .with_state(Arc::new(behavior))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "RepoHub API is running" }))
}

async fn preflight(State(behavior): State<Arc<StubBehavior>>) -> Response {
    let mut response = StatusCode::OK.into_response();
    for (name, value) in CORS {
        if behavior
            .omit_cors_header
            .is_some_and(|omit| omit.eq_ignore_ascii_case(name))
        {
            continue;
        }
        response.headers_mut().insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    response
}

async fn submissions(State(behavior): State<Arc<StubBehavior>>) -> Json<Value> {
    Json(behavior.submissions_body.clone().unwrap_or_else(|| json!([])))
}

async fn comments(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.contains_key("repoId") || params.contains_key("repoUrl") {
        Json(json!([])).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "repoId or repoUrl is required" })),
        )
            .into_response()
    }
}

async fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" }))).into_response()
}

/// Serves the stub on an ephemeral port and returns its base URL.
pub async fn spawn_stub(behavior: StubBehavior) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let app = router(behavior);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL on which nothing is listening.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// A settings file pointing at `base_url`.
pub fn settings_file(base_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# RepoHub frontend settings").unwrap();
    writeln!(file, "NEXT_PUBLIC_BASE_URL={base_url}").unwrap();
    writeln!(file, "NEXT_PUBLIC_SUPABASE_URL=https://db.example.com").unwrap();
    file
}
