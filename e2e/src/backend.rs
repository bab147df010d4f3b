//! Mock backend server that simulates a LangGraph server
//!
//! A single fallback handler records every request it receives and serves
//! the next queued response. When nothing is queued, it answers with a
//! sensible default for the LangGraph route it was called on.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::types::{BackendState, MockResponse, ReceivedRequest, SharedBackendState};

/// Default response for POST /threads
fn default_thread_response() -> MockResponse {
    MockResponse::json(format!(
        r#"{{"thread_id":"thread-{}","metadata":{{}}}}"#,
        uuid::Uuid::new_v4()
    ))
}

/// Default SSE body for POST /threads/{id}/runs/stream
fn default_run_stream_response() -> MockResponse {
    MockResponse::sse(
        "event: metadata\ndata: {\"run_id\":\"run-default\"}\n\n\
         event: messages/partial\ndata: [{\"content\":\"Default \",\"type\":\"ai\"}]\n\n\
         event: messages/complete\ndata: [{\"content\":\"Default response\",\"type\":\"ai\"}]\n\n",
    )
}

/// Default for anything else (health probes, assistant search, ...)
fn default_ok_response() -> MockResponse {
    MockResponse::json(r#"{"ok":true}"#)
}

/// Record the request and serve the next queued response (or a default)
async fn handle_any(State(state): State<SharedBackendState>, request: Request<Body>) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let api_key = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let body_bytes = axum::body::to_bytes(request.into_body(), 10 * 1024 * 1024)
        .await
        .unwrap_or_default();

    let received = ReceivedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        api_key,
        body: String::from_utf8_lossy(&body_bytes).to_string(),
    };

    let mock_response = {
        let mut state = state.lock().unwrap();
        state.received_requests.push(received);
        state.response_queue.pop_front().unwrap_or_else(|| {
            if method == "POST" && path == "/threads" {
                default_thread_response()
            } else if path.ends_with("/runs/stream") {
                default_run_stream_response()
            } else {
                default_ok_response()
            }
        })
    };

    Response::builder()
        .status(mock_response.status)
        .header("Content-Type", &mock_response.content_type)
        .body(Body::from(mock_response.body))
        .unwrap()
        .into_response()
}

/// Start the mock backend on the given port, returning its shared state
pub async fn start(port: u16) -> anyhow::Result<SharedBackendState> {
    let state: SharedBackendState = Arc::new(Mutex::new(BackendState::default()));

    let app = Router::new().fallback(handle_any).with_state(state.clone());

    let addr: SocketAddr = format!("127.0.0.1:{}", port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend crashed");
    });

    Ok(state)
}
