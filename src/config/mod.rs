//! Configuration types for the GraphQL client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientOptions`]: Client-level defaults (headers, retry policy, timeout)
//! - [`ClientOptionsBuilder`]: A builder for constructing [`ClientOptions`]
//! - [`RequestOptions`]: Per-request overrides layered over [`ClientOptions`]
//! - [`Endpoint`]: A validated endpoint URL
//!
//! # Layering
//!
//! Every request resolves its effective options from two layers. Fields set
//! on [`RequestOptions`] shadow the client's [`ClientOptions`] one by one.
//! Headers merge key by key (header names compare case-insensitively) rather
//! than replacing the whole map.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use gql_request::{ClientOptions, RetryPolicy};
//!
//! let options = ClientOptions::builder()
//!     .header("Authorization", "Bearer token")
//!     .retry(RetryPolicy::default().with_retries(2))
//!     .timeout(Duration::from_secs(30))
//!     .build();
//!
//! assert_eq!(options.retry().retries(), 2);
//! ```

mod newtypes;

pub use newtypes::Endpoint;

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::RetryPolicy;

/// Client-level request configuration.
///
/// # Defaults
///
/// - `headers`: empty
/// - `retry`: [`RetryPolicy::default`] (9 retries, 1s→40s backoff, 5xx gateway statuses)
/// - `timeout`: `None`
#[derive(Clone, Debug, Default)]
pub struct ClientOptions {
    headers: HashMap<String, String>,
    retry: RetryPolicy,
    timeout: Option<Duration>,
}

impl ClientOptions {
    /// Creates a new builder for constructing `ClientOptions`.
    #[must_use]
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::new()
    }

    /// Returns the default headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the per-attempt timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Replaces the whole default header map.
    pub fn set_headers(&mut self, headers: HashMap<String, String>) {
        self.headers = headers;
    }

    /// Sets a single default header, leaving the others untouched.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        merge_header(&mut self.headers, key.into(), value.into());
    }

    /// Resolves the effective options for one request.
    #[must_use]
    pub fn layered(&self, overrides: &RequestOptions) -> Self {
        let mut headers = self.headers.clone();
        merge_headers(&mut headers, &overrides.headers);

        Self {
            headers,
            retry: overrides.retry.clone().unwrap_or_else(|| self.retry.clone()),
            timeout: overrides.timeout.or(self.timeout),
        }
    }
}

// Verify ClientOptions is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientOptions>();
};

/// Builder for constructing [`ClientOptions`] instances.
///
/// Unset fields fall back to the [`ClientOptions`] defaults.
#[derive(Debug, Default)]
pub struct ClientOptionsBuilder {
    headers: Option<HashMap<String, String>>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl ClientOptionsBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all default headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single default header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        merge_header(
            self.headers.get_or_insert_with(HashMap::new),
            key.into(),
            value.into(),
        );
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Shortcut for overriding only the retry budget.
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retry = Some(self.retry.take().unwrap_or_default().with_retries(retries));
        self
    }

    /// Sets the per-attempt timeout passed to the transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientOptions`].
    #[must_use]
    pub fn build(self) -> ClientOptions {
        ClientOptions {
            headers: self.headers.unwrap_or_default(),
            retry: self.retry.unwrap_or_default(),
            timeout: self.timeout,
        }
    }
}

/// Per-request overrides, layered over the client's [`ClientOptions`].
///
/// # Example
///
/// ```rust
/// use gql_request::{RequestOptions, RetryPolicy};
///
/// let overrides = RequestOptions::new()
///     .header("X-Request-Id", "abc-123")
///     .retry(RetryPolicy::none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    headers: HashMap<String, String>,
    retry: Option<RetryPolicy>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty overrides; the client's options apply unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header for this request only.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        merge_header(&mut self.headers, key.into(), value.into());
        self
    }

    /// Overrides the retry policy for this request.
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Overrides the per-attempt timeout for this request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Inserts `key`, replacing any existing entry whose name matches
/// case-insensitively.
pub(crate) fn merge_header(headers: &mut HashMap<String, String>, key: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
    headers.insert(key, value);
}

/// Merges `overrides` into `headers`; overriding keys win.
pub(crate) fn merge_headers(
    headers: &mut HashMap<String, String>,
    overrides: &HashMap<String, String>,
) {
    for (key, value) in overrides {
        merge_header(headers, key.clone(), value.clone());
    }
}
