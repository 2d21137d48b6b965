//! Serialization of a query and its variables into a transport request.

use std::collections::HashMap;

use serde::Serialize;

use crate::clients::graphql::types::Variables;
use crate::clients::graphql::GraphqlError;
use crate::clients::HttpRequest;
use crate::config::{merge_headers, ClientOptions, Endpoint};

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The JSON body posted to the endpoint.
///
/// `variables` is left out of the payload entirely when absent.
#[derive(Debug, Serialize)]
pub struct GraphqlRequestBody<'a> {
    /// The query string.
    pub query: &'a str,
    /// The query variables, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Variables>,
}

/// Encodes `{query, variables}` as JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the variables cannot be serialized.
pub fn encode_body(query: &str, variables: Option<&Variables>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&GraphqlRequestBody { query, variables })
}

/// Builds the transport request for a query.
///
/// Headers start from `Content-Type: application/json`, then the configured
/// headers are merged on top. Everything else in `options` (retry policy,
/// timeout) is passed through untouched.
///
/// # Errors
///
/// Returns [`GraphqlError::Json`] if the body cannot be encoded, or
/// [`GraphqlError::Http`] if a header is not valid HTTP.
pub fn build_request(
    endpoint: &Endpoint,
    query: &str,
    variables: Option<&Variables>,
    options: &ClientOptions,
) -> Result<HttpRequest, GraphqlError> {
    let body = encode_body(query, variables)?;

    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
    merge_headers(&mut headers, options.headers());

    HttpRequest::builder(endpoint.as_ref())
        .headers(headers)
        .body(body)
        .retry(options.retry().clone())
        .timeout(options.timeout())
        .build()
        .map_err(|e| GraphqlError::Http(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn endpoint() -> Endpoint {
        Endpoint::new("https://api.example.com/graphql").unwrap()
    }

    #[test]
    fn test_body_omits_missing_variables() {
        let body = encode_body("{ ping }", None).unwrap();
        assert_eq!(body, r#"{"query":"{ ping }"}"#);
    }

    #[test]
    fn test_body_keeps_empty_variables() {
        let variables = Variables::new();
        let body: Value = serde_json::from_str(&encode_body("{ ping }", Some(&variables)).unwrap()).unwrap();
        assert_eq!(body, json!({"query": "{ ping }", "variables": {}}));
    }

    #[test]
    fn test_body_decodes_back_to_query_and_variables() {
        let variables = json!({"id": "gid://Product/1", "first": 10, "tags": ["a", "b"]})
            .as_object()
            .cloned()
            .unwrap();

        let body: Value =
            serde_json::from_str(&encode_body("query($id: ID!) { node(id: $id) { id } }", Some(&variables)).unwrap())
                .unwrap();

        assert_eq!(body["query"], "query($id: ID!) { node(id: $id) { id } }");
        assert_eq!(body["variables"], Value::Object(variables));
    }

    #[test]
    fn test_build_request_sets_json_content_type() {
        let request = build_request(&endpoint(), "{ ping }", None, &ClientOptions::default()).unwrap();

        assert_eq!(request.url, "https://api.example.com/graphql");
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&JSON_CONTENT_TYPE.to_string())
        );
        assert_eq!(request.body, r#"{"query":"{ ping }"}"#);
    }

    #[test]
    fn test_build_request_caller_headers_win() {
        let options = ClientOptions::builder()
            .header("content-type", "application/json; charset=utf-8")
            .header("Authorization", "Bearer t")
            .build();

        let request = build_request(&endpoint(), "{ ping }", None, &options).unwrap();

        assert_eq!(request.headers.len(), 2);
        assert_eq!(
            request.headers.get("content-type"),
            Some(&"application/json; charset=utf-8".to_string())
        );
        assert!(!request.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_build_request_passes_retry_and_timeout_through() {
        let options = ClientOptions::builder()
            .retries(2)
            .timeout(std::time::Duration::from_secs(3))
            .build();

        let request = build_request(&endpoint(), "{ ping }", None, &options).unwrap();

        assert_eq!(request.retry.retries(), 2);
        assert_eq!(request.timeout, Some(std::time::Duration::from_secs(3)));
    }

    #[test]
    fn test_build_request_rejects_invalid_header() {
        let options = ClientOptions::builder().header("bad header", "x").build();
        let result = build_request(&endpoint(), "{ ping }", None, &options);

        assert!(matches!(result, Err(GraphqlError::Http(_))));
    }
}
