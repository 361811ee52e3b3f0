//! OAuth token exchange types

use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// Form fields for `POST /oauth2/access_token`. Empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthTokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub refresh_token: String,
    pub scope: String,
    pub redirect_uri: String,
}

impl OAuthTokenRequest {
    /// Exchange an authorization code for tokens.
    pub fn authorization_code(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: "authorization_code".to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    /// Refresh an access token.
    pub fn refresh_token(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            grant_type: "refresh_token".to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }

    /// Non-empty fields as form pairs, in a fixed order.
    pub fn form_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("grant_type", self.grant_type.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", self.code.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("scope", self.scope.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthTokenResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub token_type: String,
    pub scope: Option<String>,
    /// Lifetime in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub expires_in: i64,
}
