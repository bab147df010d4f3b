//! Shared types for the e2e test framework

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock response the backend will serve for the next request
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub content_type: String,
}

impl MockResponse {
    /// Create a standard JSON response
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_type: "application/json".to_string(),
        }
    }

    /// Create an SSE response (for /runs/stream)
    pub fn sse(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_type: "text/event-stream".to_string(),
        }
    }

    /// Create an error response
    pub fn error(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: "application/json".to_string(),
        }
    }
}

/// Shared state for the mock backend server
#[derive(Debug, Default)]
pub struct BackendState {
    /// Queue of responses to serve - tests push responses, backend pops and serves them
    pub response_queue: VecDeque<MockResponse>,
    /// All requests received by the backend (for inspection)
    pub received_requests: Vec<ReceivedRequest>,
}

/// A request received by the mock backend
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Value of the x-api-key header, if present
    pub api_key: Option<String>,
    /// Raw request body bytes as a string
    pub body: String,
}

pub type SharedBackendState = Arc<Mutex<BackendState>>;

/// A parsed SSE event from a streamed run response
#[derive(Debug, Clone)]
pub struct SseEvent {
    /// SSE event name ("metadata", "messages/partial", ...), if any
    pub event: Option<String>,
    pub data: String,
}

impl SseEvent {
    pub fn parse_json(&self) -> anyhow::Result<serde_json::Value> {
        serde_json::from_str(&self.data)
            .map_err(|e| anyhow::anyhow!("SSE JSON parse error: {}: {}", e, self.data))
    }
}

/// Result of a single test case
#[derive(Debug)]
#[allow(dead_code)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}
