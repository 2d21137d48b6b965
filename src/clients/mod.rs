//! HTTP transport and GraphQL client types.
//!
//! This module provides the transport layer the GraphQL client sends
//! through, the retry policy that drives it, and the GraphQL client itself.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: the seam between the GraphQL client and the network
//! - [`HttpClient`]: the default `reqwest`-backed transport
//! - [`HttpRequest`]: a fully built `POST` request
//! - [`HttpResponse`]: a received response (status, lowercased headers, body)
//! - [`RetryPolicy`]: how many times and how long to wait between attempts
//! - [`graphql::GraphqlClient`]: the GraphQL client façade
//!
//! # Example
//!
//! ```rust,ignore
//! use gql_request::{HttpClient, HttpRequest, RetryPolicy, Transport};
//!
//! let client = HttpClient::new();
//!
//! let request = HttpRequest::builder("https://api.example.com/graphql")
//!     .header("Content-Type", "application/json")
//!     .body(r#"{"query":"{ ping }"}"#)
//!     .retry(RetryPolicy::default().with_retries(2))
//!     .build()
//!     .unwrap();
//!
//! let response = client.send(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! [`HttpClient`] retries according to the request's [`RetryPolicy`]:
//!
//! - **500, 502, 503, 504**: retried by default
//! - **Network errors**: retried by default
//! - **Other statuses**: returned immediately
//!
//! When retries run out the last response is returned as-is, so a final 5xx
//! still reaches the caller as a response rather than an error.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;
mod retry;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, Transport};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use retry::{
    RetryDelay, RetryDelayFn, RetryOn, RetryPolicy, RetryPredicate, DEFAULT_INITIAL_DELAY_MS,
    DEFAULT_MAX_DELAY_MS, DEFAULT_RETRIES, DEFAULT_RETRY_STATUSES,
};

// Re-export GraphQL client types at the clients module level
pub use graphql::{ClientError, GraphqlClient, GraphqlError};
