//! Structured API errors
//!
//! Normalizes the error bodies PandaDoc returns (`{"type","detail"}`,
//! `{"code","message","details"}`, OAuth `{"error","error_description"}`,
//! plain text) into one [`ApiError`] value.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde_json::{Map, Value};
use std::fmt;

/// Header names checked for a request-correlation id, in priority order.
/// Header lookup is case-insensitive.
const REQUEST_ID_HEADERS: [&str; 2] = ["x-request-id", "request-id"];

const CODE_KEYS: [&str; 3] = ["code", "type", "error"];
const MESSAGE_KEYS: [&str; 4] = ["message", "detail", "error_description", "error"];

/// A non-success response from the PandaDoc API.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status of the response
    pub status: StatusCode,
    /// Machine-readable error code, when the body carried one
    pub code: Option<String>,
    /// Human-readable message; never empty
    pub message: String,
    /// Structured detail payload, when the body carried one
    pub details: Option<Value>,
    /// Request-correlation id from the response headers
    pub request_id: Option<String>,
    /// Raw `Retry-After` header value
    pub retry_after: Option<String>,
    /// Response body as received (lossy UTF-8)
    pub raw_body: String,
    /// All response headers
    pub headers: HeaderMap,
}

impl ApiError {
    /// Read the response body and build the error. Never fails; a body read
    /// failure leaves `raw_body` empty.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.ok();
        Self::from_parts(status, headers, body.as_deref())
    }

    /// Build the error from an already-read response. `body` is `None` when
    /// reading the body failed.
    pub fn from_parts(status: StatusCode, headers: HeaderMap, body: Option<&[u8]>) -> Self {
        let request_id = REQUEST_ID_HEADERS
            .iter()
            .find_map(|name| header_text(&headers, name).filter(|v| !v.is_empty()));
        let retry_after = headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut error = Self {
            status,
            code: None,
            message: String::new(),
            details: None,
            request_id,
            retry_after,
            raw_body: String::new(),
            headers,
        };

        if let Some(body) = body {
            error.raw_body = String::from_utf8_lossy(body).into_owned();
            error.populate_from_body(body);
        }

        if error.message.is_empty() {
            error.message = match status.canonical_reason() {
                Some(reason) => reason.to_string(),
                None => format!("HTTP {}", status.as_u16()),
            };
        }
        error
    }

    fn populate_from_body(&mut self, body: &[u8]) {
        if body.is_empty() {
            return;
        }
        match serde_json::from_slice::<Map<String, Value>>(body) {
            Ok(obj) => {
                self.code = first_string(&obj, &CODE_KEYS);
                if let Some(message) = first_string(&obj, &MESSAGE_KEYS) {
                    self.message = message;
                }
                self.details = extract_details(&obj);
            }
            Err(_) => {
                if self.message.is_empty() {
                    self.message = self.raw_body.trim().to_string();
                }
            }
        }
    }

    /// Numeric HTTP status.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    pub fn is_forbidden(&self) -> bool {
        self.status == StatusCode::FORBIDDEN
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "pandadoc API error: status={} code={} message={}",
                self.status.as_u16(),
                code,
                self.message
            ),
            None => write!(
                f,
                "pandadoc API error: status={} message={}",
                self.status.as_u16(),
                self.message
            ),
        }
    }
}

impl std::error::Error for ApiError {}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

// `details` is kept whatever its type; `detail` only when structured.
fn extract_details(obj: &Map<String, Value>) -> Option<Value> {
    if let Some(details) = obj.get("details") {
        return Some(details.clone());
    }
    match obj.get("detail") {
        Some(detail @ (Value::Object(_) | Value::Array(_))) => Some(detail.clone()),
        _ => None,
    }
}
