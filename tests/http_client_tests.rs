//! Integration tests for the transport layer and retry policies.
//!
//! These tests exercise custom retry predicates and delay functions through
//! the public API, and plug alternative transports into the GraphQL client.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gql_request::{
    ClientOptions, Endpoint, GraphqlClient, HttpClient, HttpRequest, RetryDelay, RetryOn,
    RetryPolicy, Transport,
};
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Custom Retry Policy Tests
// ============================================================================

#[tokio::test]
async fn test_custom_predicate_retries_rate_limits() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let retry = RetryPolicy::default()
        .with_retry_on(RetryOn::custom(|_, _, response| {
            response.is_some_and(|r| r.status == 429)
        }))
        .with_retry_delay(RetryDelay::Fixed(Duration::from_millis(5)));
    let request = HttpRequest::builder(server.uri()).retry(retry).build().unwrap();

    let response = HttpClient::new().send(request).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_retry_budget_caps_custom_predicate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let retry = RetryPolicy::default()
        .with_retries(2)
        .with_retry_on(RetryOn::custom(|_, _, _| true))
        .with_retry_delay(RetryDelay::Fixed(Duration::from_millis(5)));
    let request = HttpRequest::builder(server.uri()).retry(retry).build().unwrap();

    let response = HttpClient::new().send(request).await.unwrap();
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_custom_delay_sees_each_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(4)
        .mount(&server)
        .await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let retry = RetryPolicy::default()
        .with_retries(3)
        .with_retry_delay(RetryDelay::custom(move |attempt, _, response| {
            recorder
                .lock()
                .unwrap()
                .push((attempt, response.map(|r| r.status)));
            Duration::from_millis(1)
        }));
    let request = HttpRequest::builder(server.uri()).retry(retry).build().unwrap();

    let response = HttpClient::new().send(request).await.unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(0, Some(500)), (1, Some(500)), (2, Some(500))]
    );
}

// ============================================================================
// Pluggable Transport Tests
// ============================================================================

/// Wraps another transport and counts calls.
struct CountingTransport<T> {
    inner: T,
    calls: AtomicU32,
}

#[async_trait::async_trait]
impl<T: Transport> Transport for CountingTransport<T> {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<gql_request::HttpResponse, gql_request::HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.send(request).await
    }
}

#[tokio::test]
async fn test_client_sends_through_custom_transport() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ping": true}})))
        .expect(2)
        .mount(&server)
        .await;

    let transport = Arc::new(CountingTransport {
        inner: HttpClient::new(),
        calls: AtomicU32::new(0),
    });
    let client = GraphqlClient::with_transport(
        Endpoint::new(server.uri()).unwrap(),
        ClientOptions::default(),
        Arc::clone(&transport),
    );

    let _: Value = client.request("{ ping }", None).await.unwrap();
    let _: Value = client.request("{ ping }", None).await.unwrap();

    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_clients_share_one_transport_concurrently() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"ping": true}})))
        .expect(8)
        .mount(&server)
        .await;

    let client = Arc::new(GraphqlClient::with_transport(
        Endpoint::new(server.uri()).unwrap(),
        ClientOptions::default(),
        HttpClient::new(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.request::<Value>("{ ping }", None).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), json!({"ping": true}));
    }
}
