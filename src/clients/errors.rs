//! Transport-level error types.
//!
//! These errors describe failures to get a response at all: a request that
//! cannot be put on the wire, or a network failure that outlived the retry
//! budget. A response that *was* received, whatever its status, is never an
//! [`HttpError`]; it is handed back to the caller for interpretation.
//!
//! # Example
//!
//! ```rust,ignore
//! use gql_request::clients::{HttpClient, HttpError, Transport};
//!
//! match transport.send(request).await {
//!     Ok(response) => println!("Status: {}", response.status),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent, when a header cannot be
/// represented on the wire.
///
/// # Example
///
/// ```rust
/// use gql_request::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::InvalidHeaderName {
///     name: "bad header".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Invalid header name 'bad header'.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A header name contains characters not allowed by HTTP.
    #[error("Invalid header name '{name}'.")]
    InvalidHeaderName {
        /// The rejected header name.
        name: String,
    },

    /// A header value contains characters not allowed by HTTP.
    #[error("Invalid value for header '{name}'.")]
    InvalidHeaderValue {
        /// The header whose value was rejected.
        name: String,
    },
}

/// Unified error type for transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, raised after the retry budget is spent.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
