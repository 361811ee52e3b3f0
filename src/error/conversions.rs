//! Type Conversions for PandaDocError
//!
//! This module contains From trait implementations for converting
//! common error types into PandaDocError.

use super::api::ApiError;
use super::types::PandaDocError;

impl From<reqwest::Error> for PandaDocError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for PandaDocError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            context: "response body".to_string(),
            source: err,
        }
    }
}

impl From<ApiError> for PandaDocError {
    fn from(err: ApiError) -> Self {
        Self::Api(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::HeaderMap;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PandaDocError = json_err.into();
        assert!(matches!(err, PandaDocError::Decode { .. }));
        assert!(err.to_string().starts_with("decode response body:"));
    }

    #[test]
    fn test_from_api_error() {
        let api = ApiError::from_parts(StatusCode::NOT_FOUND, HeaderMap::new(), None);
        let err: PandaDocError = api.into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "pandadoc API error: status=404 message=Not Found");
    }

    #[tokio::test]
    async fn test_from_reqwest_error() {
        // Nothing listens on port 9 of the loopback address
        let reqwest_err = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();
        let err: PandaDocError = reqwest_err.into();
        assert!(matches!(err, PandaDocError::Transport(_)));
    }
}
