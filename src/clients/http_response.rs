//! HTTP response types for the transport layer.
//!
//! This module provides the [`HttpResponse`] type: the status, headers and
//! raw body text of whatever the endpoint sent back. Decoding the body is
//! left to the caller.

use std::collections::HashMap;

/// An HTTP response as received from the endpoint.
///
/// Header names are stored lowercased; a header may carry several values.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use gql_request::clients::HttpResponse;
///
/// let mut headers = HashMap::new();
/// headers.insert(
///     "content-type".to_string(),
///     vec!["application/json; charset=utf-8".to_string()],
/// );
///
/// let response = HttpResponse::new(200, headers, r#"{"data":{}}"#.to_string());
/// assert!(response.is_ok());
/// assert!(response.is_json());
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, lowercasing header names.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }

        Self {
            status,
            headers: normalized,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns `true` if the content type starts with `application/json`.
    ///
    /// Parameters such as `charset` are tolerated.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Returns the body as text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body is not valid JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
