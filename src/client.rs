//! PandaDoc client
//!
//! [`Client`] is a cheap handle over a shared [`RequestExecutor`]. Resource
//! services borrow the client and build one request per call.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

use crate::config::{ClientBuilder, ClientConfig, ClientOption};
use crate::error::Result;
use crate::execution::{DownloadResponse, RequestDescriptor, RequestExecutor};
use crate::retry::RetryPolicy;
use crate::services::{
    DocumentsService, OAuthService, ProductCatalogService, WebhookEventsService,
    WebhookSubscriptionsService,
};
use crate::utils::cancel::CancelHandle;

/// Async client for the PandaDoc API.
///
/// Cloning is cheap and clones share the connection pool. A client may carry a
/// [`CancelHandle`]; every call made through it stops with
/// `PandaDocError::Cancelled` once the handle is cancelled.
#[derive(Debug, Clone)]
pub struct Client {
    executor: Arc<RequestExecutor>,
    cancel: Option<CancelHandle>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Build a client from a resolved configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let executor = RequestExecutor::from_config(config)?;
        Ok(Self {
            executor: Arc::new(executor),
            cancel: None,
        })
    }

    /// Client authenticating with an API key and default settings.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Client authenticating with an OAuth access token and default settings.
    pub fn with_access_token(token: impl Into<String>) -> Result<Self> {
        Self::builder().access_token(token).build()
    }

    /// Client configured from `PANDADOC_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Client built from `options` applied in order over the defaults.
    pub fn with_options(options: impl IntoIterator<Item = ClientOption>) -> Result<Self> {
        options
            .into_iter()
            .fold(Self::builder(), ClientBuilder::option)
            .build()
    }

    /// A clone of this client whose calls observe `cancel`.
    pub fn with_cancel_handle(&self, cancel: CancelHandle) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            cancel: Some(cancel),
        }
    }

    pub fn base_url(&self) -> &Url {
        self.executor.base_url()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        self.executor.retry_policy()
    }

    // ========================================================================
    // Services
    // ========================================================================

    pub fn documents(&self) -> DocumentsService<'_> {
        DocumentsService::new(self)
    }

    pub fn product_catalog(&self) -> ProductCatalogService<'_> {
        ProductCatalogService::new(self)
    }

    pub fn oauth(&self) -> OAuthService<'_> {
        OAuthService::new(self)
    }

    pub fn webhook_subscriptions(&self) -> WebhookSubscriptionsService<'_> {
        WebhookSubscriptionsService::new(self)
    }

    pub fn webhook_events(&self) -> WebhookEventsService<'_> {
        WebhookEventsService::new(self)
    }

    // ========================================================================
    // Raw requests
    // ========================================================================

    /// Execute a custom request and return the accepted response unread.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<reqwest::Response> {
        self.executor.execute(request, self.cancel.as_ref()).await
    }

    /// Execute a custom request and decode its JSON body. `None` for an empty body.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<Option<T>> {
        self.executor
            .execute_json(request, self.cancel.as_ref())
            .await
    }

    /// Execute a custom request and discard the body.
    pub async fn execute_no_content(&self, request: RequestDescriptor) -> Result<()> {
        self.executor
            .execute_no_content(request, self.cancel.as_ref())
            .await
    }

    /// Execute a custom request and return the body as a download.
    pub async fn download(&self, request: RequestDescriptor) -> Result<DownloadResponse> {
        self.executor.download(request, self.cancel.as_ref()).await
    }

    /// Decode into `T`, using `T::default()` for an empty body.
    pub(crate) async fn fetch<T: DeserializeOwned + Default>(
        &self,
        request: RequestDescriptor,
    ) -> Result<T> {
        Ok(self.execute_json(request).await?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PandaDocError;
    use std::time::Duration;

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
    }

    #[test]
    fn test_with_api_key_uses_defaults() {
        let client = Client::with_api_key("k").unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.pandadoc.com/");
        assert_eq!(client.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn test_with_options_applies_in_order() {
        let client = Client::with_options([
            ClientOption::BaseUrl("https://first.test".into()),
            ClientOption::BaseUrl("https://second.test/api".into()),
            ClientOption::Timeout(Duration::from_secs(3)),
        ])
        .unwrap();
        assert_eq!(client.base_url().as_str(), "https://second.test/api/");
    }

    #[test]
    fn test_blank_credentials_mean_unauthenticated() {
        let client = Client::builder().api_key("  ").build().unwrap();
        assert!(client.executor.authenticator().credentials().is_none());
    }

    #[test]
    fn test_both_credentials_rejected() {
        let err = Client::builder()
            .api_key("k")
            .access_token("t")
            .build()
            .unwrap_err();
        assert!(matches!(err, PandaDocError::MultipleAuthenticationMethods));
    }

    #[test]
    fn test_unsendable_credential_fails_build() {
        let err = Client::builder().access_token("tok\r\nen").build().unwrap_err();
        assert!(matches!(err, PandaDocError::InvalidHeader(_)));
    }

    #[test]
    fn test_cancel_handle_clone_shares_executor() {
        let client = Client::with_api_key("k").unwrap();
        let scoped = client.with_cancel_handle(CancelHandle::new());
        assert!(Arc::ptr_eq(&client.executor, &scoped.executor));
        assert!(client.cancel.is_none());
        assert!(scoped.cancel.is_some());
    }
}
