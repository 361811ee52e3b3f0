//! Request body encoding

use super::multipart::MultipartPayload;
use crate::error::{PandaDocError, Result};

/// An encoded request body, replayed unchanged on every attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EncodedBody {
    pub bytes: Vec<u8>,
    /// `None` when no body was set
    pub content_type: Option<String>,
}

impl EncodedBody {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode at most one of the three body kinds.
pub(crate) fn encode_body(
    json_body: Option<serde_json::Result<Vec<u8>>>,
    form_body: Option<Vec<(String, String)>>,
    multipart: Option<MultipartPayload>,
) -> Result<EncodedBody> {
    let kinds = [json_body.is_some(), form_body.is_some(), multipart.is_some()]
        .into_iter()
        .filter(|set| *set)
        .count();
    if kinds > 1 {
        return Err(PandaDocError::OnlyOneBodyType);
    }

    if let Some(json) = json_body {
        let bytes = json.map_err(PandaDocError::EncodeJson)?;
        return Ok(EncodedBody {
            bytes,
            content_type: Some("application/json".to_string()),
        });
    }

    if let Some(pairs) = form_body {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        return Ok(EncodedBody {
            bytes: encoded.into_bytes(),
            content_type: Some("application/x-www-form-urlencoded".to_string()),
        });
    }

    if let Some(payload) = multipart {
        let (bytes, content_type) = payload.encode()?;
        return Ok(EncodedBody {
            bytes,
            content_type: Some(content_type),
        });
    }

    Ok(EncodedBody::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::multipart::FilePart;
    use serde::ser::{Error as _, Serialize, Serializer};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_no_body() {
        let body = encode_body(None, None, None).unwrap();
        assert!(body.is_empty());
        assert_eq!(body.content_type, None);
    }

    #[test]
    fn test_json_body() {
        let json = serde_json::to_vec(&serde_json::json!({"name": "Quote"}));
        let body = encode_body(Some(json), None, None).unwrap();
        assert_eq!(body.bytes, br#"{"name":"Quote"}"#);
        assert_eq!(body.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_json_failure_is_encode_error() {
        struct Unserializable;
        impl Serialize for Unserializable {
            fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(S::Error::custom("not serializable"))
            }
        }
        let json = serde_json::to_vec(&Unserializable);
        let err = encode_body(Some(json), None, None).unwrap_err();
        assert!(matches!(err, PandaDocError::EncodeJson(_)));
    }

    #[test]
    fn test_form_body_keeps_order() {
        let body = encode_body(
            None,
            Some(pairs(&[("grant_type", "authorization_code"), ("code", "a b&c")])),
            None,
        )
        .unwrap();
        assert_eq!(body.bytes, b"grant_type=authorization_code&code=a+b%26c");
        assert_eq!(
            body.content_type.as_deref(),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[test]
    fn test_json_and_form_rejected() {
        let json = serde_json::to_vec(&serde_json::json!({}));
        let err = encode_body(Some(json), Some(pairs(&[("a", "b")])), None).unwrap_err();
        assert!(matches!(err, PandaDocError::OnlyOneBodyType));
    }

    #[test]
    fn test_body_kind_check_runs_before_encoding() {
        // The multipart part has no source, but the ambiguity is reported first
        let multipart = MultipartPayload::new().file(FilePart::new("file", "a.pdf"));
        let err = encode_body(None, Some(Vec::new()), Some(multipart)).unwrap_err();
        assert!(matches!(err, PandaDocError::OnlyOneBodyType));
    }

    #[test]
    fn test_multipart_content_type() {
        let multipart = MultipartPayload::new().field("a", "1");
        let body = encode_body(None, None, Some(multipart)).unwrap();
        assert!(
            body.content_type
                .unwrap()
                .starts_with("multipart/form-data; boundary=")
        );
    }
}
