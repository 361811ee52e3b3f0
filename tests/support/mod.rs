//! Shared helpers for the wiremock-backed integration tests
#![allow(dead_code)]

use pandadoc::{Client, RetryPolicyConfig};
use std::time::Duration;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

/// Retry policy with millisecond backoff so retry tests stay fast.
pub fn fast_retries(max_retries: i32) -> RetryPolicyConfig {
    RetryPolicyConfig::new()
        .with_max_retries(max_retries)
        .with_initial_backoff(Duration::from_millis(1))
        .with_max_backoff(Duration::from_millis(10))
}

/// API-key client pointed at `server` with no retries.
pub fn client_for(server: &MockServer) -> Client {
    client_with_retries(server, 0)
}

pub fn client_with_retries(server: &MockServer, max_retries: i32) -> Client {
    Client::builder()
        .base_url(server.uri())
        .api_key(API_KEY)
        .retry_policy(fast_retries(max_retries))
        .build()
        .expect("client builds")
}

/// Client with no credentials.
pub fn anonymous_client(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.uri())
        .retry_policy(fast_retries(0))
        .build()
        .expect("client builds")
}

/// `(field name, payload)` of every part in a multipart body, in order.
pub fn multipart_parts(content_type: &str, body: &[u8]) -> Vec<(String, Vec<u8>)> {
    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .expect("multipart boundary");
    let delimiter = format!("--{boundary}");
    let text = String::from_utf8_lossy(body).into_owned();

    text.split(delimiter.as_str())
        .filter(|chunk| !chunk.is_empty() && !chunk.starts_with("--"))
        .filter_map(|chunk| {
            let chunk = chunk.strip_prefix("\r\n")?;
            let (head, payload) = chunk.split_once("\r\n\r\n")?;
            let name = head
                .split("name=\"")
                .nth(1)?
                .split('"')
                .next()?
                .to_string();
            let payload = payload.strip_suffix("\r\n").unwrap_or(payload);
            Some((name, payload.as_bytes().to_vec()))
        })
        .collect()
}
