//! GraphQL-specific error types.
//!
//! # Error Handling
//!
//! Every client operation fails with a [`GraphqlError`]:
//!
//! - [`GraphqlError::Client`]: the endpoint answered, but not with usable data.
//!   Wraps a [`ClientError`] carrying the response snapshot and the request.
//! - [`GraphqlError::Http`]: no response could be obtained (network failure
//!   after retries, or an invalid header).
//! - [`GraphqlError::Config`]: the endpoint URL was rejected.
//! - [`GraphqlError::Json`]: the body was not valid JSON despite its content
//!   type, or `data` did not match the requested type.
//!
//! # Example
//!
//! ```rust,ignore
//! use gql_request::{GraphqlClient, GraphqlError};
//!
//! match client.request::<serde_json::Value>("{ ping }", None).await {
//!     Ok(data) => println!("Data: {data}"),
//!     Err(GraphqlError::Client(e)) => {
//!         println!("GraphQL error {}: {:?}", e.status(), e.response.errors);
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::clients::graphql::types::{GraphqlResponse, GraphqlResponseError, RequestContext};
use crate::clients::HttpError;
use crate::error::ConfigError;

/// A response that was received but could not be treated as a success.
///
/// The message is the first GraphQL error's message, or
/// `GraphQL Error (Code: <status>)` when there is none, followed by a JSON
/// dump of `{response, request}`.
///
/// # Example
///
/// ```rust
/// use gql_request::{ClientError, GraphqlResponse, RequestContext};
///
/// let error = ClientError::new(
///     GraphqlResponse {
///         error: Some("Internal Server Error".to_string()),
///         status: 500,
///         ..GraphqlResponse::default()
///     },
///     RequestContext {
///         query: "{ ping }".to_string(),
///         variables: None,
///     },
/// );
///
/// assert!(error.to_string().starts_with("GraphQL Error (Code: 500): {"));
/// ```
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    /// Snapshot of the failed response.
    pub response: GraphqlResponse,
    /// The query and variables that produced it.
    pub request: RequestContext,
    message: String,
}

#[derive(Serialize)]
struct ErrorDump<'a> {
    response: &'a GraphqlResponse,
    request: &'a RequestContext,
}

impl ClientError {
    /// Wraps a failed response together with the request that caused it.
    #[must_use]
    pub fn new(response: GraphqlResponse, request: RequestContext) -> Self {
        let dump = serde_json::to_string(&ErrorDump {
            response: &response,
            request: &request,
        })
        .unwrap_or_else(|_| "{}".to_string());
        let message = format!("{}: {dump}", Self::extract_message(&response));

        Self {
            response,
            request,
            message,
        }
    }

    fn extract_message(response: &GraphqlResponse) -> String {
        let typed = response
            .errors
            .as_deref()
            .and_then(<[GraphqlResponseError]>::first)
            .map(|error| error.message.as_str());
        // An `errors` array that did not decode is kept raw in `other`
        let raw = || {
            response
                .other
                .get("errors")
                .and_then(|errors| errors.get(0))
                .and_then(|error| error.get("message"))
                .and_then(Value::as_str)
        };

        typed.or_else(raw).map_or_else(
            || format!("GraphQL Error (Code: {})", response.status),
            str::to_string,
        )
    }

    /// Returns the HTTP status of the failed response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status
    }

    /// Returns the structured GraphQL errors, if the response had any.
    #[must_use]
    pub fn errors(&self) -> Option<&[GraphqlResponseError]> {
        self.response.errors.as_deref()
    }
}

/// Error type for GraphQL client operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// The endpoint responded without usable data.
    #[error(transparent)]
    Client(Box<ClientError>),

    /// No response could be obtained.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The client configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A JSON body or its `data` could not be decoded.
    #[error("Failed to decode GraphQL response: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphqlError {
    /// Returns the [`ClientError`] if this is a failed response.
    #[must_use]
    pub fn as_client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Client(error) => Some(&**error),
            _ => None,
        }
    }
}

impl From<ClientError> for GraphqlError {
    fn from(error: ClientError) -> Self {
        Self::Client(Box::new(error))
    }
}
