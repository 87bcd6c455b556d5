//! End-to-end dispatch behavior against fake transports: request encoding,
//! the single-exchange guarantee, handler ordering and short-circuiting,
//! and error translation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert2::{check, let_assert};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use indexmap::IndexMap;

use kintone_client::api::app::{AddFormFieldsRequest, GetAppRequest};
use kintone_client::api::Endpoint;
use kintone_client::model::FieldProperty;
use kintone_client::{
    ApiClientError, Auth, KintoneClient, KintoneClientBuilder, RateLimitHandler, RawResponse,
    ResponseHandler, Transport, TransportFuture, TransportRequest,
};

/// Transport that replays a canned response and records every request.
#[derive(Debug, Clone)]
struct CannedTransport {
    status: StatusCode,
    headers: HeaderMap,
    body: &'static str,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl CannedTransport {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn header(mut self, name: http::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .expect("unpoisoned")
            .last()
            .expect("at least one request")
            .clone()
    }
}

impl Transport for CannedTransport {
    fn exchange(&self, request: TransportRequest) -> TransportFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("unpoisoned").push(request);
        let response = RawResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: Bytes::from_static(self.body.as_bytes()),
        };
        Box::pin(async move { Ok(response) })
    }
}

/// Handler that records its name, optionally rewriting the body.
#[derive(Debug)]
struct RecordingHandler {
    name: &'static str,
    rewrite: Option<&'static str>,
    log: Arc<Mutex<Vec<String>>>,
    seen_bodies: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandler {
    fn new(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            rewrite: None,
            log,
            seen_bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn rewriting(mut self, body: &'static str) -> Self {
        self.rewrite = Some(body);
        self
    }
}

impl ResponseHandler for RecordingHandler {
    fn on_response(
        &self,
        _endpoint: &Endpoint,
        response: RawResponse,
    ) -> Result<RawResponse, ApiClientError> {
        self.log
            .lock()
            .expect("unpoisoned")
            .push(self.name.to_string());
        self.seen_bodies
            .lock()
            .expect("unpoisoned")
            .push(response.body_text().into_owned());
        match self.rewrite {
            Some(body) => Ok(response.with_body(body)),
            None => Ok(response),
        }
    }
}

/// Handler that always fails, to prove short-circuiting.
#[derive(Debug)]
struct RejectingHandler;

impl ResponseHandler for RejectingHandler {
    fn on_response(
        &self,
        _endpoint: &Endpoint,
        _response: RawResponse,
    ) -> Result<RawResponse, ApiClientError> {
        Err(ApiClientError::Remote {
            status: 200,
            code: "TEST_REJECT".to_string(),
            id: String::new(),
            message: "rejected by handler".to_string(),
        })
    }
}

const APP_BODY: &str = r#"{
    "appId": "42",
    "code": "",
    "name": "Sample",
    "description": "",
    "spaceId": null,
    "threadId": null,
    "createdAt": "2024-01-15T09:12:00Z",
    "creator": {"code": "alice", "name": "Alice"},
    "modifiedAt": "2024-02-01T10:00:00Z",
    "modifier": {"code": "bob", "name": "Bob"}
}"#;

fn client_with(transport: CannedTransport) -> KintoneClient {
    KintoneClientBuilder::new("https://example.cybozu.com")
        .auth(Auth::api_token("token"))
        .with_transport(transport)
        .build()
        .expect("valid configuration")
}

#[tokio::test]
async fn performs_exactly_one_exchange_per_call() {
    let transport = CannedTransport::new(StatusCode::OK, APP_BODY);
    let client = client_with(transport.clone());

    let app = client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");

    check!(transport.call_count() == 1);
    check!(app.app_id == 42);
    check!(app.name == "Sample");
}

#[tokio::test]
async fn read_requests_travel_in_the_query_string() {
    let transport = CannedTransport::new(StatusCode::OK, APP_BODY);
    let client = client_with(transport.clone());

    client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");

    let request = transport.last_request();
    check!(request.method == http::Method::GET);
    check!(request.url.as_str() == "https://example.cybozu.com/k/v1/app.json?id=42");
    check!(request.body.is_none());
    check!(request.headers.contains_key("x-cybozu-api-token"));
}

#[tokio::test]
async fn write_requests_omit_unset_fields_from_the_body() {
    let transport = CannedTransport::new(StatusCode::OK, r#"{"revision":"3"}"#);
    let client = client_with(transport.clone());

    let mut properties = IndexMap::new();
    properties.insert(
        "title".to_string(),
        FieldProperty::RichText {
            code: "title".to_string(),
            label: "Title".to_string(),
            no_label: None,
            required: None,
            default_value: None,
        },
    );
    let revision = client
        .app()
        .add_form_fields(AddFormFieldsRequest::new(5, properties))
        .await
        .expect("successful call");
    check!(revision == 3);

    let request = transport.last_request();
    check!(request.method == http::Method::POST);
    check!(request.url.query().is_none());

    let body: serde_json::Value =
        serde_json::from_slice(request.body.as_ref().expect("a body")).expect("json body");
    let object = body.as_object().expect("an object");
    check!(!object.contains_key("revision"));
    check!(!body["properties"]["title"]
        .as_object()
        .expect("an object")
        .contains_key("defaultValue"));
}

#[tokio::test]
async fn handlers_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let transport = CannedTransport::new(StatusCode::OK, "ignored");
    let first = RecordingHandler::new("first", Arc::clone(&log)).rewriting(APP_BODY);
    let second = RecordingHandler::new("second", Arc::clone(&log));
    let second_bodies = Arc::clone(&second.seen_bodies);

    let client = KintoneClientBuilder::new("https://example.cybozu.com")
        .auth(Auth::api_token("token"))
        .with_transport(transport)
        .add_response_handler(first)
        .add_response_handler(second)
        .build()
        .expect("valid configuration");

    let app = client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");

    check!(*log.lock().expect("unpoisoned") == vec!["first", "second"]);
    // The second handler observes the first one's rewrite, and decoding
    // consumes the rewritten body.
    check!(second_bodies.lock().expect("unpoisoned")[0] == APP_BODY);
    check!(app.app_id == 42);
}

#[tokio::test]
async fn swapping_registration_order_swaps_invocation_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let transport = CannedTransport::new(StatusCode::OK, APP_BODY);

    let client = KintoneClientBuilder::new("https://example.cybozu.com")
        .auth(Auth::api_token("token"))
        .with_transport(transport)
        .add_response_handler(RecordingHandler::new("second", Arc::clone(&log)))
        .add_response_handler(RecordingHandler::new("first", Arc::clone(&log)))
        .build()
        .expect("valid configuration");

    client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");

    check!(*log.lock().expect("unpoisoned") == vec!["second", "first"]);
}

#[tokio::test]
async fn failing_handler_short_circuits_later_handlers_and_decoding() {
    let log = Arc::new(Mutex::new(Vec::new()));
    // The body is not valid JSON: reaching the decoder would fail with a
    // decode error rather than the handler's.
    let transport = CannedTransport::new(StatusCode::OK, "not json at all");

    let client = KintoneClientBuilder::new("https://example.cybozu.com")
        .auth(Auth::api_token("token"))
        .with_transport(transport)
        .add_response_handler(RejectingHandler)
        .add_response_handler(RecordingHandler::new("after", Arc::clone(&log)))
        .build()
        .expect("valid configuration");

    let result = client.call(GetAppRequest::new(42)).await;

    let_assert!(Err(ApiClientError::Remote { code, .. }) = result);
    check!(code == "TEST_REJECT");
    check!(log.lock().expect("unpoisoned").is_empty());
}

#[tokio::test]
async fn repeated_reads_decode_to_equal_responses() {
    let transport = CannedTransport::new(StatusCode::OK, APP_BODY);
    let client = client_with(transport.clone());

    let first = client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");
    let second = client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");

    check!(first == second);
    check!(transport.call_count() == 2);
}

#[tokio::test]
async fn remote_errors_surface_code_and_message() {
    let transport = CannedTransport::new(
        StatusCode::BAD_REQUEST,
        r#"{"code":"CB_VA01","id":"err-1","message":"Missing or invalid input."}"#,
    );
    let client = client_with(transport);

    let result = client.call(GetAppRequest::new(42)).await;

    let_assert!(
        Err(ApiClientError::Remote {
            status,
            code,
            message,
            ..
        }) = result
    );
    check!(status == 400);
    check!(code == "CB_VA01");
    check!(message == "Missing or invalid input.");
}

#[tokio::test]
async fn throttled_replies_become_rate_limit_errors() {
    let transport = CannedTransport::new(
        StatusCode::FORBIDDEN,
        r#"{"code":"GAIA_TM12","id":"err-2","message":"Too many requests."}"#,
    )
    .header(http::header::RETRY_AFTER, HeaderValue::from_static("30"));

    let client = KintoneClientBuilder::new("https://example.cybozu.com")
        .auth(Auth::api_token("token"))
        .with_transport(transport)
        .add_response_handler(RateLimitHandler::default())
        .build()
        .expect("valid configuration");

    let result = client.call(GetAppRequest::new(42)).await;

    let_assert!(Err(ApiClientError::RateLimited { retry_after }) = result);
    check!(retry_after == Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn schema_drift_is_reported_with_the_json_path() {
    let transport = CannedTransport::new(StatusCode::OK, r#"{"appId":"not-a-number"}"#);
    let client = client_with(transport);

    let result = client.call(GetAppRequest::new(42)).await;

    let_assert!(Err(ApiClientError::Decode { path, body, .. }) = result);
    check!(path == "appId");
    check!(body.contains("not-a-number"));
}

#[tokio::test]
async fn guest_space_clients_prefix_every_request() {
    let transport = CannedTransport::new(StatusCode::OK, APP_BODY);
    let client = KintoneClientBuilder::new("https://example.cybozu.com")
        .auth(Auth::api_token("token"))
        .guest_space_id(17)
        .with_transport(transport.clone())
        .build()
        .expect("valid configuration");

    client
        .call(GetAppRequest::new(42))
        .await
        .expect("successful call");

    check!(
        transport
            .last_request()
            .url
            .path()
            .starts_with("/k/guest/17/v1/")
    );
}
