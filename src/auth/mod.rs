//! Authentication
//!
//! PandaDoc accepts either an API key (`Authorization: API-Key <key>`) or an
//! OAuth access token (`Authorization: Bearer <token>`). A client holds at most
//! one of them.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{PandaDocError, Result};

/// A configured credential.
#[derive(Debug, Clone)]
pub enum Credentials {
    ApiKey(SecretString),
    AccessToken(SecretString),
}

impl Credentials {
    fn authorization_value(&self) -> Result<HeaderValue> {
        let value = match self {
            Self::ApiKey(key) => format!("API-Key {}", key.expose_secret()),
            Self::AccessToken(token) => format!("Bearer {}", token.expose_secret()),
        };
        let mut value = HeaderValue::from_str(&value).map_err(|e| {
            PandaDocError::InvalidHeader(format!("invalid credential format: {e}"))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Injects the `Authorization` header into outgoing requests.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    credentials: Option<Credentials>,
    header: Option<HeaderValue>,
}

impl Authenticator {
    /// Build from the optional API key and access token. Blank values count as
    /// unset; setting both is an error, as is a credential that is not a valid
    /// header value.
    pub fn new(api_key: Option<&SecretString>, access_token: Option<&SecretString>) -> Result<Self> {
        let api_key = api_key.and_then(trimmed_secret);
        let access_token = access_token.and_then(trimmed_secret);
        let credentials = match (api_key, access_token) {
            (Some(_), Some(_)) => return Err(PandaDocError::MultipleAuthenticationMethods),
            (Some(key), None) => Some(Credentials::ApiKey(key)),
            (None, Some(token)) => Some(Credentials::AccessToken(token)),
            (None, None) => None,
        };
        let header = credentials
            .as_ref()
            .map(Credentials::authorization_value)
            .transpose()?;
        Ok(Self { credentials, header })
    }

    /// The configured credential, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Set `Authorization` on `headers`, replacing any existing value.
    ///
    /// Without credentials this is a no-op unless `require_auth` is set, in
    /// which case it fails with `MissingAuthentication`.
    pub fn apply(&self, headers: &mut HeaderMap, require_auth: bool) -> Result<()> {
        match &self.header {
            Some(value) => {
                headers.insert(AUTHORIZATION, value.clone());
                Ok(())
            }
            None if require_auth => Err(PandaDocError::MissingAuthentication),
            None => Ok(()),
        }
    }
}

fn trimmed_secret(secret: &SecretString) -> Option<SecretString> {
    let trimmed = secret.expose_secret().trim();
    (!trimmed.is_empty()).then(|| SecretString::from(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn test_api_key_header() {
        let auth = Authenticator::new(Some(&secret(" key-123 ")), None).unwrap();
        let mut headers = HeaderMap::new();
        auth.apply(&mut headers, true).unwrap();
        assert_eq!(headers[AUTHORIZATION], "API-Key key-123");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_bearer_header_replaces_existing() {
        let auth = Authenticator::new(None, Some(&secret("tok"))).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        auth.apply(&mut headers, false).unwrap();
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
    }

    #[test]
    fn test_both_credentials_rejected() {
        let err = Authenticator::new(Some(&secret("k")), Some(&secret("t"))).unwrap_err();
        assert!(matches!(err, PandaDocError::MultipleAuthenticationMethods));
    }

    #[test]
    fn test_blank_credentials_are_unset() {
        let auth = Authenticator::new(Some(&secret("  ")), Some(&secret("t"))).unwrap();
        assert!(matches!(auth.credentials(), Some(Credentials::AccessToken(_))));
    }

    #[test]
    fn test_missing_credentials() {
        let auth = Authenticator::default();
        let mut headers = HeaderMap::new();
        let err = auth.apply(&mut headers, true).unwrap_err();
        assert!(matches!(err, PandaDocError::MissingAuthentication));

        auth.apply(&mut headers, false).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_invalid_credential_rejected_at_construction() {
        let err = Authenticator::new(Some(&secret("key\nInjected: 1")), None).unwrap_err();
        assert!(matches!(err, PandaDocError::InvalidHeader(_)));

        let err = Authenticator::new(None, Some(&secret("tok\u{7f}en"))).unwrap_err();
        assert!(matches!(err, PandaDocError::InvalidHeader(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = Authenticator::new(Some(&secret("super-secret")), None).unwrap();
        assert!(!format!("{auth:?}").contains("super-secret"));
    }
}
