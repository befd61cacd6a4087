use std::time::Duration;

use agrione_domain::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use agrione_domain::{AgriError, HttpConfig};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::errors::InfraError;

/// Longest upstream body excerpt carried in an error message.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// HTTP client shared by every upstream integration.
///
/// Each request is sent exactly once. Retries belong to the resilience
/// executor that wraps the calling flow, so a failed status is turned into a
/// classified [`AgriError::Upstream`] instead of being retried here.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, AgriError> {
        Self::builder().build()
    }

    /// Client configured from the `[http]` section.
    pub fn from_config(config: &HttpConfig) -> Result<Self, AgriError> {
        Self::builder().timeout(config.timeout()).user_agent(&config.user_agent).build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send the request once. Transport failures become domain errors; any
    /// status is returned as-is.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AgriError> {
        let request = builder.build().map_err(|err| AgriError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = redact_query(request.url());
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }

    /// Send the request and require a 2xx status.
    pub async fn send_checked(&self, builder: RequestBuilder) -> Result<Response, AgriError> {
        let response = self.send(builder).await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(status_error(response).await)
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, AgriError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| AgriError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Convert a non-success response into [`AgriError::Upstream`].
///
/// The message is taken from a Google-style `{"error":{"message":..}}` body
/// when present, otherwise from the status reason and a body excerpt.
pub async fn status_error(response: Response) -> AgriError {
    let status = response.status();
    let retry_after_secs = retry_after(response.headers());
    let body = response.text().await.unwrap_or_default();

    AgriError::Upstream {
        status: status.as_u16(),
        message: error_message(status, &body),
        retry_after_secs,
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return format!("{reason}: {}", envelope.error.message);
    }
    let body = body.trim();
    if body.is_empty() {
        reason.to_string()
    } else {
        let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{reason}: {excerpt}")
    }
}

/// `Retry-After` in delay-seconds form; HTTP dates are ignored.
fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}

/// URL for logging with credential query parameters masked.
fn redact_query(url: &reqwest::Url) -> String {
    let mut redacted = url.clone();
    if url.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let value = if k.eq_ignore_ascii_case("key") { "***".into() } else { v.into_owned() };
                (k.into_owned(), value)
            })
            .collect();
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}
