//! Request executor
//!
//! Owns the attempt/retry loop shared by every API call. The loop is
//! sequential in the calling task: build URL, encode body once, then per
//! attempt send, classify, and either return, retry, or fail.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, RETRY_AFTER, USER_AGENT};
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::download::DownloadResponse;
use super::encoding::{EncodedBody, encode_body};
use super::request::RequestDescriptor;
use super::url::{build_url, normalize_base_url};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::defaults;
use crate::error::{ApiError, PandaDocError, Result};
use crate::retry::{RetryPolicy, parse_retry_after};
use crate::utils::cancel::{CancelHandle, run_cancellable, sleep_cancellable};

const LOG_TARGET: &str = "pandadoc::http";

/// Executes [`RequestDescriptor`]s against the configured API.
///
/// Immutable after construction and shared by every clone of a `Client`.
#[derive(Debug)]
pub struct RequestExecutor {
    base_url: Url,
    http_client: reqwest::Client,
    user_agent: HeaderValue,
    timeout: Duration,
    retry_policy: RetryPolicy,
    authenticator: Authenticator,
}

impl RequestExecutor {
    /// Validate `config` and build the executor. Credential conflicts are
    /// reported before base URL problems.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let authenticator =
            Authenticator::new(config.api_key.as_ref(), config.access_token.as_ref())?;
        let base_url = normalize_base_url(&config.base_url)?;
        if config.timeout.is_zero() {
            return Err(PandaDocError::InvalidTimeout);
        }
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| PandaDocError::InvalidHeader(format!("user agent: {e}")))?;
        let http_client = match config.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|e| PandaDocError::Configuration(format!("build HTTP client: {e}")))?,
        };

        Ok(Self {
            base_url,
            http_client,
            user_agent,
            timeout: config.timeout,
            retry_policy: config.retry_policy,
            authenticator,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Run `request` and return the accepted response with its body unread.
    pub async fn execute(
        &self,
        mut request: RequestDescriptor,
        cancel: Option<&CancelHandle>,
    ) -> Result<Response> {
        // 1. Resolve the URL
        let url = build_url(&self.base_url, &request.path, &request.query)?;

        // 2. Encode the body once; every attempt replays these bytes
        let json_body = request.json_body.take();
        let form_body = request.form_body.take();
        let body = match request.multipart.take() {
            // File sources are blocking readers
            Some(multipart) => tokio::task::spawn_blocking(move || {
                encode_body(json_body, form_body, Some(multipart))
            })
            .await
            .map_err(|e| PandaDocError::EncodeMultipart {
                field: "body".to_string(),
                source: std::io::Error::other(e),
            })??,
            None => encode_body(json_body, form_body, None)?,
        };

        // 3. Build the header set shared by all attempts
        let headers = self.build_headers(
            &body,
            request.accept.as_deref(),
            &request.headers,
            request.require_auth,
        )?;
        let timeout = request.timeout.unwrap_or(self.timeout);
        let method = request.method.clone();

        // 4. Attempt loop
        let mut attempt: u32 = 0;
        loop {
            tracing::debug!(
                target: LOG_TARGET,
                method = %method,
                url = %url,
                attempt = attempt + 1,
                "sending request"
            );

            let mut builder = self
                .http_client
                .request(method.clone(), url.clone())
                .headers(headers.clone())
                .timeout(timeout);
            if !body.is_empty() {
                builder = builder.body(body.bytes.clone());
            }
            let http_request = builder
                .build()
                .map_err(|e| PandaDocError::Configuration(format!("build request: {e}")))?;

            let outcome = run_cancellable(cancel, self.http_client.execute(http_request)).await?;

            let response = match outcome {
                Ok(response) => response,
                Err(err) => {
                    if !self.retry_policy.should_retry_on_transport_error(attempt) {
                        if attempt > 0 {
                            tracing::warn!(
                                target: LOG_TARGET,
                                error = %err,
                                attempts = attempt + 1,
                                "retries exhausted after transport errors"
                            );
                        }
                        return Err(PandaDocError::Transport(err));
                    }
                    let delay = self.retry_policy.backoff(attempt);
                    tracing::info!(
                        target: LOG_TARGET,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after transport error"
                    );
                    sleep_cancellable(cancel, delay).await?;
                    attempt += 1;
                    continue;
                }
            };

            let status = response.status();
            tracing::debug!(target: LOG_TARGET, status = status.as_u16(), "received response");

            if self.retry_policy.should_retry_on_status(attempt, status) {
                let delay = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(parse_retry_after)
                    .unwrap_or_else(|| self.retry_policy.backoff(attempt));
                tracing::info!(
                    target: LOG_TARGET,
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    "retrying on status"
                );
                drain(response, cancel).await?;
                sleep_cancellable(cancel, delay).await?;
                attempt += 1;
                continue;
            }

            if !request.status_expected(status) {
                if self.retry_policy.retries_status(status) && self.retry_policy.max_retries() > 0 {
                    tracing::warn!(
                        target: LOG_TARGET,
                        status = status.as_u16(),
                        attempts = attempt + 1,
                        "retries exhausted"
                    );
                }
                let api_error = run_cancellable(cancel, ApiError::from_response(response)).await?;
                tracing::error!(
                    target: LOG_TARGET,
                    status = api_error.status_code(),
                    code = api_error.code.as_deref().unwrap_or(""),
                    request_id = api_error.request_id.as_deref().unwrap_or(""),
                    "API error"
                );
                return Err(api_error.into());
            }

            return Ok(response);
        }
    }

    /// Run `request` and decode its JSON body. An empty or whitespace-only body
    /// yields `None`.
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
        cancel: Option<&CancelHandle>,
    ) -> Result<Option<T>> {
        let context = format!("{} {} response", request.method, request.path);
        let response = self.execute(request, cancel).await?;
        let bytes = run_cancellable(cancel, response.bytes())
            .await?
            .map_err(PandaDocError::Transport)?;
        decode_json_body(&bytes, &context)
    }

    /// Run `request` and discard its body.
    pub async fn execute_no_content(
        &self,
        request: RequestDescriptor,
        cancel: Option<&CancelHandle>,
    ) -> Result<()> {
        self.execute(request, cancel).await.map(drop)
    }

    /// Run `request` and hand the live body to the caller.
    pub async fn download(
        &self,
        request: RequestDescriptor,
        cancel: Option<&CancelHandle>,
    ) -> Result<DownloadResponse> {
        let response = self.execute(request, cancel).await?;
        Ok(DownloadResponse::new(response))
    }

    fn build_headers(
        &self,
        body: &EncodedBody,
        accept: Option<&str>,
        extra_headers: &[(String, String)],
        require_auth: bool,
    ) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if !body.is_empty()
            && let Some(content_type) = &body.content_type
        {
            headers.insert(CONTENT_TYPE, header_value("Content-Type", content_type)?);
        }
        let accept = accept
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(defaults::http::ACCEPT);
        headers.insert(ACCEPT, header_value("Accept", accept)?);
        headers.insert(USER_AGENT, self.user_agent.clone());

        for (name, value) in extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| PandaDocError::InvalidHeader(format!("name '{name}': {e}")))?;
            headers.append(header_name, header_value(name, value)?);
        }

        self.authenticator.apply(&mut headers, require_auth)?;
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| PandaDocError::InvalidHeader(format!("value for '{name}': {e}")))
}

/// Read and discard the rest of a response body so the connection is released.
async fn drain(response: Response, cancel: Option<&CancelHandle>) -> Result<()> {
    // Body read errors are irrelevant here; the request is retried anyway
    let _ = run_cancellable(cancel, response.bytes()).await?;
    Ok(())
}

pub(crate) fn decode_json_body<T: DeserializeOwned>(bytes: &[u8], context: &str) -> Result<Option<T>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|source| PandaDocError::Decode {
            context: context.to_string(),
            source,
        })
}
