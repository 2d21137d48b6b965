//! Transport abstraction and the default `reqwest`-backed implementation.
//!
//! This module provides the [`Transport`] trait consumed by the GraphQL
//! client, and [`HttpClient`], the transport used unless another is supplied.
//! The transport owns the attempt loop; callers only see the final outcome.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Crate version from Cargo.toml.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// An HTTP request primitive with built-in retry support.
///
/// Implementations send `request` with `POST`, applying `request.retry`
/// between attempts. They resolve with the final response, whatever its
/// status, or with the final transport error once the policy gives up.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request, retrying according to its policy.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid or no response could
    /// be obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request).await
    }
}

/// Default transport built on `reqwest`.
///
/// The client handles:
/// - The `User-Agent` header
/// - Per-attempt timeouts
/// - The retry loop: attempt, consult the policy, sleep, repeat
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new transport with a rustls-backed `reqwest` client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("gql-request v{SDK_VERSION}"))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Creates a transport around an existing `reqwest` client.
    ///
    /// Useful for sharing a connection pool or configuring proxies.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Sends a single attempt, without retrying.
    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut req_builder = self.client.post(&request.url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key.as_str(), value.as_str());
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let res = req_builder.body(request.body.clone()).send().await?;

        let status = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        Ok(HttpResponse::new(status, headers, body))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut attempt: u32 = 0;
        loop {
            tracing::debug!(url = %request.url, attempt, "Sending GraphQL request");

            let outcome = self.send_once(&request).await;
            let (error, response) = match &outcome {
                Ok(response) => (None, Some(response)),
                Err(error) => (Some(error), None),
            };

            let Some(delay) = request.retry.next_delay(attempt, error, response) else {
                return outcome;
            };

            match &outcome {
                Ok(response) => tracing::warn!(
                    url = %request.url,
                    attempt,
                    status = response.status,
                    delay_ms = delay.as_millis(),
                    "Retrying GraphQL request after server error"
                ),
                Err(error) => tracing::warn!(
                    url = %request.url,
                    attempt,
                    error = %error,
                    delay_ms = delay.as_millis(),
                    "Retrying GraphQL request after network error"
                ),
            }

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
