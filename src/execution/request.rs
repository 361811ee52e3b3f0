//! Request descriptors

use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::time::Duration;

use super::multipart::MultipartPayload;

/// Declarative description of one API call.
///
/// Built fresh per call and handed by value to the executor. At most one body
/// kind may be set; setting more is reported as `OnlyOneBodyType` when the
/// request is executed.
///
/// ```rust
/// use pandadoc::{Method, RequestDescriptor, StatusCode};
///
/// let request = RequestDescriptor::new(Method::POST, "/public/v1/documents")
///     .json(&serde_json::json!({"name": "Quote"}))
///     .expect_status(StatusCode::CREATED);
/// assert_eq!(request.path(), "/public/v1/documents");
/// ```
#[derive(Debug)]
pub struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) require_auth: bool,
    pub(crate) accept: Option<String>,
    /// Serialized eagerly; a failure surfaces as `EncodeJson` at encode time.
    pub(crate) json_body: Option<serde_json::Result<Vec<u8>>>,
    pub(crate) form_body: Option<Vec<(String, String)>>,
    pub(crate) multipart: Option<MultipartPayload>,
    pub(crate) expected_status: Vec<StatusCode>,
    pub(crate) timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// A request for `path` (relative to the client base URL, may carry a query
    /// string). Authentication is required by default.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            require_auth: true,
            accept: None,
            json_body: None,
            form_body: None,
            multipart: None,
            expected_status: Vec::new(),
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter; repeated keys are kept.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters in order.
    pub fn queries<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Append an extra header; repeated names are sent as multiple values.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn require_auth(mut self, require: bool) -> Self {
        self.require_auth = require;
        self
    }

    /// Override the `Accept` header (defaults to `application/json`).
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Set a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.json_body = Some(serde_json::to_vec(body));
        self
    }

    /// Set a URL-encoded form body; pairs are encoded in order.
    pub fn form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.form_body = Some(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Set a multipart/form-data body.
    pub fn multipart(mut self, payload: MultipartPayload) -> Self {
        self.multipart = Some(payload);
        self
    }

    /// Add a status considered successful. With none set, any 2xx succeeds.
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected_status.push(status);
        self
    }

    /// Per-request timeout, overriding the client timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether `status` counts as success for this request.
    pub fn status_expected(&self, status: StatusCode) -> bool {
        if self.expected_status.is_empty() {
            status.is_success()
        } else {
            self.expected_status.contains(&status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = RequestDescriptor::get("/x");
        assert_eq!(req.method(), Method::GET);
        assert!(req.require_auth);
        assert!(req.accept.is_none());
        assert!(req.json_body.is_none() && req.form_body.is_none() && req.multipart.is_none());
    }

    #[test]
    fn test_status_expected_defaults_to_2xx() {
        let req = RequestDescriptor::get("/x");
        assert!(req.status_expected(StatusCode::OK));
        assert!(req.status_expected(StatusCode::NO_CONTENT));
        assert!(!req.status_expected(StatusCode::MOVED_PERMANENTLY));
        assert!(!req.status_expected(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_status_expected_whitelist() {
        let req = RequestDescriptor::post("/x").expect_status(StatusCode::CREATED);
        assert!(req.status_expected(StatusCode::CREATED));
        assert!(!req.status_expected(StatusCode::OK));
    }

    #[test]
    fn test_query_and_headers_keep_order() {
        let req = RequestDescriptor::get("/x")
            .query("a", "1")
            .queries([("b", "2"), ("a", "3")])
            .header("X-Trace", "one")
            .header("X-Trace", "two");
        assert_eq!(
            req.query,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
        assert_eq!(req.headers.len(), 2);
    }
}
