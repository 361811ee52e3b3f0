//! Client configuration
//!
//! A [`ClientConfig`] starts from the values in [`crate::defaults`]. Options are
//! applied in order, each one validated as it is applied; cross-field checks
//! (credential conflicts, base URL shape) run once when the client is built.

use secrecy::SecretString;
use std::time::Duration;

use crate::client::Client;
use crate::defaults;
use crate::error::{PandaDocError, Result};
use crate::retry::{RetryPolicy, RetryPolicyConfig};

/// Resolved client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; normalized when the client is built
    pub base_url: String,
    /// Timeout applied to each attempt
    pub timeout: Duration,
    /// Custom HTTP client; one is built from `timeout` when absent
    pub http_client: Option<reqwest::Client>,
    /// User-Agent header value
    pub user_agent: String,
    /// Retry policy (always normalized)
    pub retry_policy: RetryPolicy,
    /// API key credential
    pub api_key: Option<SecretString>,
    /// OAuth access token credential
    pub access_token: Option<SecretString>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::http::BASE_URL.to_string(),
            timeout: defaults::http::REQUEST_TIMEOUT,
            http_client: None,
            user_agent: defaults::http::USER_AGENT.to_string(),
            retry_policy: RetryPolicy::default(),
            api_key: None,
            access_token: None,
        }
    }
}

/// One configuration change, applied by [`ClientConfig::apply`].
#[derive(Debug, Clone)]
pub enum ClientOption {
    BaseUrl(String),
    /// Must be non-zero
    Timeout(Duration),
    HttpClient(reqwest::Client),
    /// Blank resets to the default user agent
    UserAgent(String),
    RetryPolicy(RetryPolicyConfig),
    ApiKey(SecretString),
    AccessToken(SecretString),
}

impl ClientConfig {
    /// Apply a single option.
    pub fn apply(&mut self, option: ClientOption) -> Result<()> {
        match option {
            ClientOption::BaseUrl(url) => self.base_url = url,
            ClientOption::Timeout(timeout) => {
                if timeout.is_zero() {
                    return Err(PandaDocError::InvalidTimeout);
                }
                self.timeout = timeout;
            }
            ClientOption::HttpClient(client) => self.http_client = Some(client),
            ClientOption::UserAgent(user_agent) => {
                let trimmed = user_agent.trim();
                self.user_agent = if trimmed.is_empty() {
                    defaults::http::USER_AGENT.to_string()
                } else {
                    trimmed.to_string()
                };
            }
            ClientOption::RetryPolicy(policy) => self.retry_policy = policy.normalize(),
            ClientOption::ApiKey(key) => self.api_key = Some(key),
            ClientOption::AccessToken(token) => self.access_token = Some(token),
        }
        Ok(())
    }

    /// Read configuration from the process environment:
    /// `PANDADOC_API_KEY`, `PANDADOC_ACCESS_TOKEN`, `PANDADOC_BASE_URL`,
    /// `PANDADOC_TIMEOUT_SECS`. Unset or blank variables keep the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = read(defaults::env::API_KEY) {
            config.apply(ClientOption::ApiKey(SecretString::from(key)))?;
        }
        if let Some(token) = read(defaults::env::ACCESS_TOKEN) {
            config.apply(ClientOption::AccessToken(SecretString::from(token)))?;
        }
        if let Some(url) = read(defaults::env::BASE_URL) {
            config.apply(ClientOption::BaseUrl(url))?;
        }
        if let Some(secs) = read(defaults::env::TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|e| {
                PandaDocError::Configuration(format!(
                    "{}: invalid number of seconds {secs:?}: {e}",
                    defaults::env::TIMEOUT_SECS
                ))
            })?;
            config.apply(ClientOption::Timeout(Duration::from_secs(secs)))?;
        }
        Ok(config)
    }
}

/// Builder for [`Client`].
///
/// ```rust
/// use pandadoc::Client;
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .api_key("my-key")
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(client.base_url().as_str(), "https://api.pandadoc.com/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    options: Vec<ClientOption>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration instead of the defaults.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            options: Vec::new(),
        }
    }

    // ========================================================================
    // Connection
    // ========================================================================

    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.option(ClientOption::BaseUrl(base_url.into()))
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        self.option(ClientOption::Timeout(timeout))
    }

    /// Use a preconfigured reqwest client. The client timeout still applies to
    /// every attempt.
    pub fn http_client(self, client: reqwest::Client) -> Self {
        self.option(ClientOption::HttpClient(client))
    }

    pub fn user_agent(self, user_agent: impl Into<String>) -> Self {
        self.option(ClientOption::UserAgent(user_agent.into()))
    }

    pub fn retry_policy(self, policy: RetryPolicyConfig) -> Self {
        self.option(ClientOption::RetryPolicy(policy))
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        self.option(ClientOption::ApiKey(SecretString::from(api_key.into())))
    }

    pub fn access_token(self, token: impl Into<String>) -> Self {
        self.option(ClientOption::AccessToken(SecretString::from(token.into())))
    }

    /// Queue a raw option.
    pub fn option(mut self, option: ClientOption) -> Self {
        self.options.push(option);
        self
    }

    /// Apply every queued option in order and build the client.
    pub fn build(self) -> Result<Client> {
        let mut config = self.config;
        for option in self.options {
            config.apply(option)?;
        }
        Client::new(config)
    }
}
