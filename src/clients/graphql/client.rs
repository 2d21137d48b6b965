//! GraphQL client implementation.
//!
//! This module provides the [`GraphqlClient`] type: a façade holding an
//! endpoint and default options, exposing raw and unwrapped request
//! operations.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::graphql::request::build_request;
use crate::clients::graphql::response::{interpret, Outcome};
use crate::clients::graphql::types::{RawResult, RequestContext, Variables};
use crate::clients::graphql::{ClientError, GraphqlError};
use crate::clients::{HttpClient, Transport};
use crate::config::{ClientOptions, Endpoint, RequestOptions};

/// GraphQL client for a single endpoint.
///
/// Requests take `&self`, so one client can serve concurrent calls; each call
/// builds its own body, headers and outcome. The header setters take
/// `&mut self`, so mutating defaults while requests are in flight requires
/// the caller's own synchronization.
///
/// # Thread Safety
///
/// `GraphqlClient<HttpClient>` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gql_request::{Endpoint, GraphqlClient};
/// use serde_json::{json, Value};
///
/// let mut client = GraphqlClient::new(Endpoint::new("https://api.example.com/graphql")?);
/// client.set_header("Authorization", "Bearer token");
///
/// // Unwrapped data
/// let data: Value = client.request("{ ping }", None).await?;
///
/// // Full envelope with headers and status
/// let variables = json!({ "id": "1" }).as_object().cloned();
/// let result = client
///     .raw_request::<Value>("query($id: ID!) { node(id: $id) { id } }", variables)
///     .await?;
/// println!("{} {:?}", result.status, result.headers.get("server"));
/// ```
#[derive(Debug)]
pub struct GraphqlClient<T = HttpClient> {
    endpoint: Endpoint,
    options: ClientOptions,
    transport: T,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient<HttpClient> {
    /// Creates a client with default options.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see [`HttpClient::new`]).
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self::with_options(endpoint, ClientOptions::default())
    }

    /// Creates a client with the given options.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see [`HttpClient::new`]).
    #[must_use]
    pub fn with_options(endpoint: Endpoint, options: ClientOptions) -> Self {
        Self::with_transport(endpoint, options, HttpClient::new())
    }
}

impl<T: Transport> GraphqlClient<T> {
    /// Creates a client that sends through a custom transport.
    #[must_use]
    pub const fn with_transport(endpoint: Endpoint, options: ClientOptions, transport: T) -> Self {
        Self {
            endpoint,
            options,
            transport,
        }
    }

    /// Returns the endpoint this client posts to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the client-level options.
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Replaces the entire default header map.
    pub fn set_headers(&mut self, headers: HashMap<String, String>) -> &mut Self {
        self.options.set_headers(headers);
        self
    }

    /// Sets a single default header without disturbing the others.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.options.set_header(key, value);
        self
    }

    /// Executes a query and returns the full success envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Client`] if the response is non-2xx, carries
    /// GraphQL errors or lacks data; [`GraphqlError::Http`] if no response
    /// could be obtained; [`GraphqlError::Json`] if the body or `data`
    /// cannot be decoded.
    pub async fn raw_request<D: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Variables>,
    ) -> Result<RawResult<D>, GraphqlError> {
        self.raw_request_with(query, variables, &RequestOptions::default())
            .await
    }

    /// Executes a query and returns only its `data`.
    ///
    /// # Errors
    ///
    /// Same as [`raw_request`](Self::raw_request).
    pub async fn request<D: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Variables>,
    ) -> Result<D, GraphqlError> {
        Ok(self.raw_request(query, variables).await?.data)
    }

    /// Like [`raw_request`](Self::raw_request), with per-request overrides
    /// layered over the client's options.
    ///
    /// # Errors
    ///
    /// Same as [`raw_request`](Self::raw_request).
    pub async fn raw_request_with<D: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Variables>,
        overrides: &RequestOptions,
    ) -> Result<RawResult<D>, GraphqlError> {
        let options = self.options.layered(overrides);
        let context = RequestContext {
            query: query.to_string(),
            variables,
        };

        let request = build_request(
            &self.endpoint,
            &context.query,
            context.variables.as_ref(),
            &options,
        )?;
        let response = self.transport.send(request).await?;

        match interpret(response)? {
            Outcome::Success(result) => Ok(result.decode()?),
            Outcome::Failure(response) => {
                tracing::debug!(
                    endpoint = %self.endpoint,
                    status = response.status,
                    "GraphQL request failed"
                );
                Err(ClientError::new(response, context).into())
            }
        }
    }

    /// Like [`request`](Self::request), with per-request overrides.
    ///
    /// # Errors
    ///
    /// Same as [`raw_request`](Self::raw_request).
    pub async fn request_with<D: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Variables>,
        overrides: &RequestOptions,
    ) -> Result<D, GraphqlError> {
        Ok(self.raw_request_with(query, variables, overrides).await?.data)
    }
}

/// Runs `query` against `url` with a throwaway default client.
///
/// # Errors
///
/// Returns [`GraphqlError::Config`] if `url` is not a valid endpoint, or
/// any error of [`GraphqlClient::raw_request`].
pub async fn raw_request<D: DeserializeOwned>(
    url: &str,
    query: &str,
    variables: Option<Variables>,
) -> Result<RawResult<D>, GraphqlError> {
    let endpoint = Endpoint::new(url)?;
    GraphqlClient::new(endpoint)
        .raw_request(query, variables)
        .await
}

/// Runs `query` against `url` with a throwaway default client and returns
/// its `data`.
///
/// # Errors
///
/// Same as [`raw_request`].
pub async fn request<D: DeserializeOwned>(
    url: &str,
    query: &str,
    variables: Option<Variables>,
) -> Result<D, GraphqlError> {
    Ok(raw_request(url, query, variables).await?.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpRequest, HttpResponse, RetryPolicy};
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Replays canned responses and records what it was asked to send.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<Vec<HttpResponse>>,
        sent: Mutex<Vec<HttpRequest>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn replying(responses: Vec<HttpResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                ..Self::default()
            })
        }

        fn last_request(&self) -> HttpRequest {
            self.sent.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.sent.lock().unwrap().push(request);
            Ok(self.responses.lock().unwrap().remove(0))
        }
    }

    fn json_response(status: u16, body: &Value) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
        headers.insert("server".to_string(), vec!["cloudflare".to_string()]);
        HttpResponse::new(status, headers, body.to_string())
    }

    fn client(transport: &Arc<ScriptedTransport>) -> GraphqlClient<Arc<ScriptedTransport>> {
        GraphqlClient::with_transport(
            Endpoint::new("https://api.example.com/graphql").unwrap(),
            ClientOptions::default(),
            Arc::clone(transport),
        )
    }

    #[test]
    fn test_graphql_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GraphqlClient>();
    }

    #[test]
    fn test_new_uses_default_options() {
        let client = GraphqlClient::new(Endpoint::new("https://api.example.com/graphql").unwrap());

        assert_eq!(client.endpoint().as_ref(), "https://api.example.com/graphql");
        assert!(client.options().headers().is_empty());
        assert_eq!(client.options().retry().retries(), 9);
    }

    #[tokio::test]
    async fn test_request_returns_data() {
        let transport = ScriptedTransport::replying(vec![json_response(
            200,
            &json!({"data": {"ping": true}}),
        )]);

        let data: Value = client(&transport).request("{ ping }", None).await.unwrap();

        assert_eq!(data, json!({"ping": true}));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_raw_request_returns_headers_and_status() {
        let transport = ScriptedTransport::replying(vec![json_response(
            200,
            &json!({"data": {"ping": true}}),
        )]);

        let result = client(&transport)
            .raw_request::<Value>("{ ping }", None)
            .await
            .unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.data, json!({"ping": true}));
        assert_eq!(result.headers["server"], vec!["cloudflare"]);
    }

    #[tokio::test]
    async fn test_request_decodes_typed_data() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Ping {
            ping: bool,
        }

        let transport = ScriptedTransport::replying(vec![json_response(
            200,
            &json!({"data": {"ping": true}}),
        )]);

        let data: Ping = client(&transport).request("{ ping }", None).await.unwrap();
        assert_eq!(data, Ping { ping: true });
    }

    #[tokio::test]
    async fn test_request_with_mismatched_type_is_json_error() {
        let transport = ScriptedTransport::replying(vec![json_response(
            200,
            &json!({"data": {"ping": true}}),
        )]);

        let result = client(&transport).request::<Vec<u32>>("{ ping }", None).await;
        assert!(matches!(result, Err(GraphqlError::Json(_))));
    }

    #[tokio::test]
    async fn test_failure_carries_request_context() {
        let errors = json!([{"message": "Syntax Error: Unexpected Name \"x\""}]);
        let transport =
            ScriptedTransport::replying(vec![json_response(200, &json!({ "errors": errors }))]);
        let variables = json!({"id": 1}).as_object().cloned();

        let error = client(&transport)
            .request::<Value>("x", variables.clone())
            .await
            .unwrap_err();

        let client_error = error.as_client_error().unwrap();
        assert_eq!(client_error.request.query, "x");
        assert_eq!(client_error.request.variables, variables);
        assert_eq!(serde_json::to_value(client_error.errors()).unwrap(), errors);
        assert!(error.to_string().starts_with("Syntax Error: Unexpected Name"));
    }

    #[tokio::test]
    async fn test_request_delegates_retry_to_transport() {
        let transport = ScriptedTransport::replying(vec![json_response(
            502,
            &json!({"errors": [{"message": "bad gateway"}]}),
        )]);

        let error = client(&transport)
            .request::<Value>("{ ping }", None)
            .await
            .unwrap_err();

        // The client itself never loops
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(error.as_client_error().unwrap().status(), 502);
        assert_eq!(transport.last_request().retry.retries(), 9);
    }

    #[test]
    fn test_set_header_accumulates_and_set_headers_replaces() {
        let transport = ScriptedTransport::replying(vec![
            json_response(200, &json!({"data": {"ping": true}})),
            json_response(200, &json!({"data": {"ping": true}})),
        ]);
        let mut client = client(&transport);

        client.set_header("X", "1").set_header("Y", "2");
        tokio_test::block_on(client.request::<Value>("{ ping }", None)).unwrap();

        let headers = transport.last_request().headers;
        assert_eq!(headers.get("X"), Some(&"1".to_string()));
        assert_eq!(headers.get("Y"), Some(&"2".to_string()));
        assert_eq!(headers.get("Content-Type"), Some(&"application/json".to_string()));

        let mut replacement = HashMap::new();
        replacement.insert("Z".to_string(), "3".to_string());
        client.set_headers(replacement);
        tokio_test::block_on(client.request::<Value>("{ ping }", None)).unwrap();

        let headers = transport.last_request().headers;
        assert!(!headers.contains_key("X"));
        assert!(!headers.contains_key("Y"));
        assert_eq!(headers.get("Z"), Some(&"3".to_string()));
    }

    #[tokio::test]
    async fn test_request_with_overrides_layer_over_client_options() {
        let transport = ScriptedTransport::replying(vec![json_response(
            200,
            &json!({"data": {"ping": true}}),
        )]);
        let mut client = client(&transport);
        client.set_header("Authorization", "Bearer client");

        let overrides = RequestOptions::new()
            .header("X-Request-Id", "abc")
            .retry(RetryPolicy::none());
        let _: Value = client
            .request_with("{ ping }", None, &overrides)
            .await
            .unwrap();

        let sent = transport.last_request();
        assert_eq!(
            sent.headers.get("Authorization"),
            Some(&"Bearer client".to_string())
        );
        assert_eq!(sent.headers.get("X-Request-Id"), Some(&"abc".to_string()));
        assert_eq!(sent.retry.retries(), 0);

        // Overrides do not leak into the client
        assert!(!client.options().headers().contains_key("X-Request-Id"));
        assert_eq!(client.options().retry().retries(), 9);
    }

    #[tokio::test]
    async fn test_body_omits_variables_when_absent() {
        let transport = ScriptedTransport::replying(vec![json_response(
            200,
            &json!({"data": {"ping": true}}),
        )]);

        let _: Value = client(&transport).request("{ ping }", None).await.unwrap();

        let body: Value = serde_json::from_str(&transport.last_request().body).unwrap();
        assert_eq!(body, json!({"query": "{ ping }"}));
    }

    #[tokio::test]
    async fn test_free_function_rejects_invalid_url() {
        let result = request::<Value>("not a url", "{ ping }", None).await;
        assert!(matches!(result, Err(GraphqlError::Config(_))));
    }
}
