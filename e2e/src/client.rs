//! HTTP client that simulates how a chat frontend talks to the proxy

use bytes::Bytes;
use futures::StreamExt;
use reqwest::Client;

use crate::types::SseEvent;

/// Build an HTTP client
pub fn build_client() -> Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to build reqwest client")
}

/// POST a JSON body through the proxy, returning status and parsed body
pub async fn post_json(
    client: &Client,
    proxy_addr: &str,
    path: &str,
    body: serde_json::Value,
) -> anyhow::Result<(u16, serde_json::Value)> {
    let url = format!("http://{proxy_addr}{path}");
    let resp = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to POST {}: {}", url, e))?;

    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let body: serde_json::Value =
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
    Ok((status, body))
}

/// POST through the proxy and collect the SSE events of the response
pub async fn post_sse(
    client: &Client,
    proxy_addr: &str,
    path: &str,
    body: serde_json::Value,
) -> anyhow::Result<Vec<SseEvent>> {
    let url = format!("http://{proxy_addr}{path}");
    let resp = client
        .post(&url)
        .header("Content-Type", "application/json")
        .header("Accept", "text/event-stream")
        .json(&body)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to POST {}: {}", url, e))?;

    let status = resp.status().as_u16();
    if status != 200 {
        let body = resp.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("Proxy returned error {}: {}", status, body));
    }

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.contains("text/event-stream") {
        return Err(anyhow::anyhow!(
            "Expected text/event-stream but got: {}",
            content_type
        ));
    }

    let mut stream = resp.bytes_stream();
    let mut all_bytes: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk: Bytes = chunk.map_err(|e| anyhow::anyhow!("Stream read error: {}", e))?;
        all_bytes.extend_from_slice(&chunk);
    }

    let body_text = String::from_utf8_lossy(&all_bytes);
    Ok(parse_sse(&body_text))
}

/// Parse SSE body text into events
///
/// Events are separated by blank lines; each block may carry an
/// "event: <name>" line followed by a "data: <payload>" line.
fn parse_sse(text: &str) -> Vec<SseEvent> {
    let mut events = Vec::new();

    for raw_event in text.split("\n\n") {
        let raw_event = raw_event.trim();
        if raw_event.is_empty() {
            continue;
        }

        let mut event_name: Option<String> = None;
        let mut data_line: Option<&str> = None;
        for line in raw_event.lines() {
            if let Some(stripped) = line.strip_prefix("event: ") {
                event_name = Some(stripped.to_string());
            } else if let Some(stripped) = line.strip_prefix("data: ") {
                data_line = Some(stripped);
            }
        }

        if let Some(data) = data_line {
            events.push(SseEvent {
                event: event_name,
                data: data.to_string(),
            });
        }
    }

    events
}

/// Send a GET request through the proxy
pub async fn send_get(
    client: &Client,
    proxy_addr: &str,
    path: &str,
) -> anyhow::Result<(u16, serde_json::Value)> {
    let url = format!("http://{proxy_addr}{path}");
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to GET {}: {}", url, e))?;

    let status = resp.status().as_u16();
    let body_text = resp.text().await.unwrap_or_default();
    let body: serde_json::Value =
        serde_json::from_str(&body_text).unwrap_or(serde_json::Value::String(body_text));
    Ok((status, body))
}
