//! OAuth token exchange

use crate::client::Client;
use crate::error::Result;
use crate::execution::RequestDescriptor;
use crate::types::{OAuthTokenRequest, OAuthTokenResponse};

const TOKEN_PATH: &str = "/oauth2/access_token";

/// OAuth operations, obtained from [`Client::oauth`]. These calls work on a
/// client without credentials.
#[derive(Debug, Clone, Copy)]
pub struct OAuthService<'a> {
    client: &'a Client,
}

impl<'a> OAuthService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Exchange an authorization code or refresh token for an access token.
    pub async fn token(&self, req: &OAuthTokenRequest) -> Result<OAuthTokenResponse> {
        let request = RequestDescriptor::post(TOKEN_PATH)
            .require_auth(false)
            .form(req.form_pairs());
        self.client.fetch(request).await
    }
}
