//! Wire-level types shared by the GraphQL request and response paths.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named parameters substituted into a query.
pub type Variables = Map<String, Value>;

/// The query and variables that produced a response, kept for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The query string as sent.
    pub query: String,
    /// The variables as sent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
}

/// A source position reported by a GraphQL error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

/// One entry of a GraphQL `errors` array.
///
/// Only `message` is required. Every other key the server sent (`locations`,
/// `path`, `extensions`, vendor keys such as `type`) is kept verbatim in
/// `other`, so an entry serializes back to exactly what was received. The
/// typed accessors read from there and tolerate `null` or partial values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponseError {
    /// Human-readable description of the error.
    pub message: String,
    /// All other fields of the entry, untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl GraphqlResponseError {
    /// Where in the query the error occurred, if reported and well-formed.
    #[must_use]
    pub fn locations(&self) -> Option<Vec<ErrorLocation>> {
        self.other
            .get("locations")
            .cloned()
            .and_then(|locations| serde_json::from_value(locations).ok())
    }

    /// Path to the response field that failed. Entries are field names or
    /// list indices.
    #[must_use]
    pub fn path(&self) -> Option<&[Value]> {
        self.other
            .get("path")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Server-specific error details (e.g. an error `code`).
    #[must_use]
    pub fn extensions(&self) -> Option<&Value> {
        self.other.get("extensions").filter(|value| !value.is_null())
    }
}

/// A successful response envelope.
///
/// `data` is always present and truthy. Top-level fields other than the
/// ones named here land in `other`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResult<T = Value> {
    /// The query result.
    pub data: T,
    /// Server-specific extensions (query cost, tracing, ...).
    pub extensions: Option<Value>,
    /// Reserved for a partial-success shape (data alongside errors). A
    /// response carrying a truthy `errors` field is currently classified as
    /// a failure, so this is always `None`; do not branch on it.
    pub errors: Option<Vec<GraphqlResponseError>>,
    /// Response headers, lowercased.
    pub headers: HashMap<String, Vec<String>>,
    /// HTTP status code.
    pub status: u16,
    /// Unrecognised top-level fields of the response body.
    pub other: Map<String, Value>,
}

impl RawResult<Value> {
    /// Deserializes `data` into `T`, keeping the rest of the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if `data` does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<RawResult<T>, serde_json::Error> {
        Ok(RawResult {
            data: serde_json::from_value(self.data)?,
            extensions: self.extensions,
            errors: self.errors,
            headers: self.headers,
            status: self.status,
            other: self.other,
        })
    }
}

/// Snapshot of a failed response, carried by
/// [`ClientError`](crate::clients::graphql::ClientError).
///
/// Structured bodies populate `data`/`errors`/`extensions`; a plain-text
/// body ends up in `error`. `status` and `headers` always come from the
/// HTTP response, never from the body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphqlResponse {
    /// The `data` field, if the body had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// The structured `errors` array, if the body had a well-formed one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphqlResponseError>>,
    /// The `extensions` field, if the body had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    /// Raw body text when the body was not a JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status code.
    pub status: u16,
    /// Response headers, lowercased.
    pub headers: HashMap<String, Vec<String>>,
    /// Any other top-level fields of the body.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Mirrors JavaScript truthiness, which decides success classification.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
