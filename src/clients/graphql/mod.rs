//! GraphQL client.
//!
//! This module turns a query and its variables into a `POST` to a GraphQL
//! endpoint, and reads the response back as either usable data or a
//! [`ClientError`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`GraphqlClient`]: holds an endpoint and default options; exposes
//!   `raw_request()` and `request()`
//! - [`RawResult`]: the full success envelope (`data`, `extensions`, headers, status)
//! - [`ClientError`]: a received response that carried no usable data
//! - [`GraphqlError`]: error type for every operation here
//!
//! The free functions [`raw_request`] and [`request`] run a single query
//! through a throwaway default client.
//!
//! # Example
//!
//! ```rust,ignore
//! use gql_request::{ClientOptions, Endpoint, GraphqlClient};
//! use serde_json::{json, Value};
//!
//! let options = ClientOptions::builder()
//!     .header("Authorization", "Bearer token")
//!     .retries(3)
//!     .build();
//! let client = GraphqlClient::with_options(
//!     Endpoint::new("https://api.example.com/graphql")?,
//!     options,
//! );
//!
//! let data: Value = client
//!     .request(
//!         "query GetUser($id: ID!) { user(id: $id) { name } }",
//!         json!({ "id": "1" }).as_object().cloned(),
//!     )
//!     .await?;
//! println!("Name: {}", data["user"]["name"]);
//! ```
//!
//! # Success Classification
//!
//! A response is a success only when its status is 2xx, its body is JSON with
//! a truthy `data` field and no truthy `errors` field. `200 OK` with an
//! `errors` array is a failure. See [`interpret`].
//!
//! # Retry Behavior
//!
//! Retries happen below this layer, in the [`Transport`](crate::clients::Transport).
//! By default a request is retried up to 9 times on 500, 502, 503, 504 and
//! on network errors, with exponential backoff from 1 second capped at 40
//! seconds.

mod client;
mod errors;
mod request;
mod response;
mod types;

pub use client::{raw_request, request, GraphqlClient};
pub use errors::{ClientError, GraphqlError};
pub use request::{build_request, encode_body, GraphqlRequestBody, JSON_CONTENT_TYPE};
pub use response::{interpret, Outcome};
pub use types::{
    ErrorLocation, GraphqlResponse, GraphqlResponseError, RawResult, RequestContext, Variables,
};
