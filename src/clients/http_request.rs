//! HTTP request types for the transport layer.
//!
//! This module provides the [`HttpRequest`] type and its builder. Requests
//! are always sent with `POST`; there is no way to override the method.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::clients::errors::InvalidHttpRequestError;
use crate::clients::retry::RetryPolicy;

/// A request ready to be handed to a [`Transport`](crate::clients::Transport).
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use gql_request::clients::HttpRequest;
///
/// let request = HttpRequest::builder("https://api.example.com/graphql")
///     .header("Content-Type", "application/json")
///     .body(r#"{"query":"{ ping }"}"#)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.body, r#"{"query":"{ ping }"}"#);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The absolute URL to post to.
    pub url: String,
    /// Headers to send with every attempt.
    pub headers: HashMap<String, String>,
    /// The encoded request body.
    pub body: String,
    /// Retry policy the transport applies to this request.
    pub retry: RetryPolicy,
    /// Per-attempt timeout, if any.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new builder for a request to `url`.
    #[must_use]
    pub fn builder(url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url)
    }

    /// Validates the request, ensuring every header can be sent.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if a header name or value is not
    /// valid HTTP.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        for (name, value) in &self.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(InvalidHttpRequestError::InvalidHeaderName { name: name.clone() });
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(InvalidHttpRequestError::InvalidHeaderValue { name: name.clone() });
            }
        }
        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    url: String,
    headers: HashMap<String, String>,
    body: String,
    retry: RetryPolicy,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            body: String::new(),
            retry: RetryPolicy::none(),
            timeout: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Replaces all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the retry policy. Defaults to [`RetryPolicy::none`].
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            url: self.url,
            headers: self.headers,
            body: self.body,
            retry: self.retry,
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}
