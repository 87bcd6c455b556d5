use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::{HeaderMap, Method};
use url::Url;

use super::error::ApiClientError;
use super::handler::RawResponse;

/// A fully-prepared HTTP request, ready for the transport.
///
/// The dispatcher builds one of these per call; everything the exchange
/// needs is already resolved (URL, headers, encoded body).
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: Method,
    /// The absolute request URL, query string included.
    pub url: Url,
    /// Request headers, authentication included.
    pub headers: HeaderMap,
    /// The encoded request body, if the endpoint takes one.
    pub body: Option<Bytes>,
}

/// The future returned by [`Transport::exchange`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RawResponse, ApiClientError>> + Send + 'a>>;

/// The HTTP exchange collaborator.
///
/// The dispatcher performs exactly one `exchange` per call and imposes no
/// timeout or retry policy of its own; both belong to the transport (or to a
/// response handler). Implementations must be safe to share across
/// concurrent calls.
///
/// The production implementation is [`ReqwestTransport`]; tests substitute
/// call-counting or canned fakes.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Performs one HTTP exchange and returns the raw response.
    fn exchange(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// [`Transport`] implementation backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an already-configured `reqwest::Client`.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn exchange(&self, request: TransportRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let TransportRequest {
                method,
                url,
                headers,
                body,
            } = request;

            let mut http_request = reqwest::Request::new(method, url);
            *http_request.headers_mut() = headers;
            if let Some(body) = body {
                *http_request.body_mut() = Some(reqwest::Body::from(body));
            }

            let response = self.client.execute(http_request).await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok(RawResponse {
                status,
                headers,
                body,
            })
        })
    }
}
