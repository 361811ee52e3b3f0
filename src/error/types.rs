//! Core error types

use reqwest::StatusCode;
use thiserror::Error;

use super::api::ApiError;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, PandaDocError>;

/// Errors returned by the PandaDoc client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PandaDocError {
    /// The configured base URL is unusable
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Both an API key and an access token were configured
    #[error("only one authentication method can be configured")]
    MultipleAuthenticationMethods,

    /// A zero timeout was configured
    #[error("timeout must be > 0")]
    InvalidTimeout,

    /// More than one body kind was set on a request
    #[error("only one request body type can be set")]
    OnlyOneBodyType,

    /// A multipart file part has no source
    #[error("file reader is required")]
    NilFileReader,

    /// A path parameter was blank after trimming
    #[error("path parameter `{0}` cannot be empty")]
    EmptyPathParameter(&'static str),

    /// A request was built with a blank endpoint path
    #[error("endpoint path is required")]
    EndpointPathRequired,

    /// The endpoint path is not a valid URI reference
    #[error("parse endpoint path: {0}")]
    InvalidEndpointPath(String),

    /// A header name or value cannot be sent
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The JSON request body failed to serialize
    #[error("encode JSON request body: {0}")]
    EncodeJson(#[source] serde_json::Error),

    /// A multipart file source failed to read
    #[error("encode multipart field `{field}`: {source}")]
    EncodeMultipart {
        field: String,
        #[source]
        source: std::io::Error,
    },

    /// Any other invalid client configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP call itself failed (connect, timeout, body read)
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// An authenticated call was made without credentials
    #[error("missing authentication credentials")]
    MissingAuthentication,

    /// The API answered with an unexpected status
    #[error(transparent)]
    Api(Box<ApiError>),

    /// A successful response body was not the expected JSON
    #[error("decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The call was cancelled through its `CancelHandle`
    #[error("request cancelled")]
    Cancelled,
}

/// Coarse classification of [`PandaDocError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Authentication,
    Api,
    Decode,
    Cancellation,
}

impl PandaDocError {
    /// Category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBaseUrl(_)
            | Self::MultipleAuthenticationMethods
            | Self::InvalidTimeout
            | Self::OnlyOneBodyType
            | Self::NilFileReader
            | Self::EmptyPathParameter(_)
            | Self::EndpointPathRequired
            | Self::InvalidEndpointPath(_)
            | Self::InvalidHeader(_)
            | Self::EncodeJson(_)
            | Self::EncodeMultipart { .. }
            | Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::MissingAuthentication => ErrorCategory::Authentication,
            Self::Api(_) => ErrorCategory::Api,
            Self::Decode { .. } => ErrorCategory::Decode,
            Self::Cancelled => ErrorCategory::Cancellation,
        }
    }

    /// The structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(api) => Some(&**api),
            _ => None,
        }
    }

    /// HTTP status of an API error.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.api_error().map(|api| api.status)
    }

    /// True for API errors with status 429 or 5xx.
    pub fn is_retryable_status(&self) -> bool {
        self.api_error().is_some_and(|api| {
            api.is_rate_limited() || api.status.is_server_error()
        })
    }

    /// True for a 401 API error.
    pub fn is_unauthorized(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_unauthorized)
    }

    /// True for a 403 API error.
    pub fn is_forbidden(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_forbidden)
    }

    /// True for a 404 API error.
    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_not_found)
    }

    /// True for a 429 API error.
    pub fn is_rate_limited(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_rate_limited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    fn api(status: u16) -> PandaDocError {
        let status = StatusCode::from_u16(status).unwrap();
        ApiError::from_parts(status, HeaderMap::new(), Some(&[][..])).into()
    }

    #[test]
    fn test_predicates_match_status() {
        assert!(api(401).is_unauthorized());
        assert!(api(403).is_forbidden());
        assert!(api(404).is_not_found());
        assert!(api(429).is_rate_limited());
        assert!(!api(400).is_rate_limited());
        assert!(!PandaDocError::MissingAuthentication.is_unauthorized());
    }

    #[test]
    fn test_retryable_status() {
        assert!(api(429).is_retryable_status());
        assert!(api(503).is_retryable_status());
        assert!(!api(404).is_retryable_status());
        assert!(!PandaDocError::Cancelled.is_retryable_status());
    }

    #[test]
    fn test_category() {
        assert_eq!(
            PandaDocError::OnlyOneBodyType.category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            PandaDocError::EmptyPathParameter("id").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(api(500).category(), ErrorCategory::Api);
        assert_eq!(PandaDocError::Cancelled.category(), ErrorCategory::Cancellation);
        assert_eq!(api(418).status_code(), Some(StatusCode::IM_A_TEAPOT));
        assert_eq!(PandaDocError::Cancelled.status_code(), None);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PandaDocError::EmptyPathParameter("folder_id").to_string(),
            "path parameter `folder_id` cannot be empty"
        );
        assert_eq!(
            PandaDocError::MultipleAuthenticationMethods.to_string(),
            "only one authentication method can be configured"
        );
    }
}
