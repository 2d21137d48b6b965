//! # gql-request
//!
//! A minimal GraphQL client: post a query with variables to an endpoint,
//! retry transient failures with exponential backoff, and get back either
//! the response data or a descriptive error.
//!
//! ## Overview
//!
//! This crate provides:
//! - A reusable [`GraphqlClient`] holding an endpoint and default options
//! - One-shot [`raw_request`] and [`request`] functions
//! - Per-client and per-request configuration via [`ClientOptions`] and [`RequestOptions`]
//! - Exponential-backoff retries on 5xx gateway statuses and network errors via [`RetryPolicy`]
//! - A [`ClientError`] carrying the full response and the originating request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gql_request::{request, Endpoint, GraphqlClient};
//! use serde_json::Value;
//!
//! // One-shot
//! let data: Value = request("https://api.example.com/graphql", "{ ping }", None).await?;
//!
//! // Reusable client
//! let mut client = GraphqlClient::new(Endpoint::new("https://api.example.com/graphql")?);
//! client.set_header("Authorization", "Bearer token");
//! let data: Value = client.request("{ ping }", None).await?;
//! ```
//!
//! ## Full Responses
//!
//! [`GraphqlClient::raw_request`] returns the whole envelope, including
//! `extensions`, response headers and the HTTP status:
//!
//! ```rust,ignore
//! use gql_request::{Endpoint, GraphqlClient};
//! use serde_json::Value;
//!
//! let client = GraphqlClient::new(Endpoint::new("https://api.example.com/graphql")?);
//! let result = client.raw_request::<Value>("{ ping }", None).await?;
//! println!("{} {:?}", result.status, result.headers.get("content-type"));
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use gql_request::{request, GraphqlError};
//!
//! match request::<serde_json::Value>(url, "{ ping }", None).await {
//!     Ok(data) => println!("{data}"),
//!     Err(GraphqlError::Client(e)) => eprintln!("status {}: {:?}", e.status(), e.errors()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Endpoints validate on construction
//! - **Thread-safe**: Clients are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Pluggable transport**: Anything implementing [`Transport`] can stand in for [`HttpClient`]

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{ClientOptions, ClientOptionsBuilder, Endpoint, RequestOptions};
pub use error::ConfigError;

// Re-export HTTP transport types
pub use clients::{
    HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse, InvalidHttpRequestError,
    RetryDelay, RetryOn, RetryPolicy, Transport,
};

// Re-export GraphQL types
pub use clients::graphql::{
    raw_request, request, ClientError, ErrorLocation, GraphqlClient, GraphqlError,
    GraphqlResponse, GraphqlResponseError, RawResult, RequestContext, Variables,
};
