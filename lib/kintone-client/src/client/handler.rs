use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::header::RETRY_AFTER;
use http::{HeaderMap, StatusCode};
use tracing::debug;

use super::error::{ApiClientError, RemoteErrorBody};
use crate::api::Endpoint;

/// A raw HTTP reply as seen by the response handler chain.
///
/// Handlers receive the response after the exchange and before
/// deserialization; they may rewrite any part of it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The undecoded response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Returns the body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns a copy of this response with the body replaced.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }
}

/// A response interceptor in the dispatch chain.
///
/// Handlers are registered at client construction and invoked, in
/// registration order, on every dispatch. A handler may:
///
/// - pass the response through unchanged,
/// - return a rewritten response (later handlers see the rewrite), or
/// - short-circuit with a typed failure, skipping the remaining handlers
///   and deserialization.
///
/// Handlers only interpret responses; they cannot change which endpoint was
/// called. Cross-cutting concerns such as logging, error translation and
/// rate-limit detection belong here rather than in the dispatch core.
pub trait ResponseHandler: Send + Sync + fmt::Debug {
    /// Inspects or rewrites one raw response.
    fn on_response(
        &self,
        endpoint: &Endpoint,
        response: RawResponse,
    ) -> Result<RawResponse, ApiClientError>;
}

/// Handler that logs every response at debug level and passes it through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl ResponseHandler for LoggingHandler {
    fn on_response(
        &self,
        endpoint: &Endpoint,
        response: RawResponse,
    ) -> Result<RawResponse, ApiClientError> {
        debug!(
            api = ?endpoint.api,
            status = %response.status,
            bytes = response.body.len(),
            "response received"
        );
        Ok(response)
    }
}

/// Handler that converts throttling replies into
/// [`ApiClientError::RateLimited`].
///
/// Triggers on `429 Too Many Requests`, and on `403 Forbidden` replies whose
/// error body carries one of the configured throttling codes. The
/// `Retry-After` header, when present and numeric, becomes the retry hint.
#[derive(Debug, Clone)]
pub struct RateLimitHandler {
    codes: Vec<String>,
}

impl Default for RateLimitHandler {
    fn default() -> Self {
        Self {
            codes: vec!["GAIA_TM12".to_string()],
        }
    }
}

impl RateLimitHandler {
    /// Creates a handler that recognizes the given throttling error codes in
    /// addition to plain `429` statuses.
    pub fn with_codes<I, T>(codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    fn is_throttled(&self, response: &RawResponse) -> bool {
        if response.status == StatusCode::TOO_MANY_REQUESTS {
            return true;
        }
        if response.status != StatusCode::FORBIDDEN {
            return false;
        }
        serde_json::from_slice::<RemoteErrorBody>(&response.body)
            .is_ok_and(|body| self.codes.iter().any(|code| *code == body.code))
    }
}

impl ResponseHandler for RateLimitHandler {
    fn on_response(
        &self,
        _endpoint: &Endpoint,
        response: RawResponse,
    ) -> Result<RawResponse, ApiClientError> {
        if !self.is_throttled(&response) {
            return Ok(response);
        }

        let retry_after = response
            .headers
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        Err(ApiClientError::RateLimited { retry_after })
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use http::Method;

    use super::*;
    use crate::api::Api;

    fn endpoint() -> &'static Endpoint {
        crate::api::endpoint(Api::GetApp).expect("registered endpoint")
    }

    fn response(status: StatusCode, body: &'static [u8]) -> RawResponse {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body),
        }
    }

    #[test]
    fn logging_handler_passes_responses_through() {
        let raw = response(StatusCode::OK, br#"{"ok":true}"#);

        let passed = LoggingHandler
            .on_response(endpoint(), raw.clone())
            .expect("pass-through");
        check!(passed.status == raw.status);
        check!(passed.body == raw.body);
    }

    #[test]
    fn rate_limit_handler_converts_429() {
        let mut raw = response(StatusCode::TOO_MANY_REQUESTS, b"{}");
        raw.headers
            .insert(RETRY_AFTER, http::HeaderValue::from_static("30"));

        let result = RateLimitHandler::default().on_response(endpoint(), raw);
        assert2::let_assert!(Err(ApiClientError::RateLimited { retry_after }) = result);
        check!(retry_after == Some(Duration::from_secs(30)));
    }

    #[test]
    fn rate_limit_handler_matches_configured_403_codes() {
        let raw = response(
            StatusCode::FORBIDDEN,
            br#"{"code":"GAIA_TM12","id":"x","message":"too many requests"}"#,
        );

        let result = RateLimitHandler::default().on_response(endpoint(), raw);
        assert2::let_assert!(Err(ApiClientError::RateLimited { retry_after }) = result);
        check!(retry_after.is_none());
    }

    #[test]
    fn rate_limit_handler_ignores_other_403_errors() {
        let raw = response(
            StatusCode::FORBIDDEN,
            br#"{"code":"CB_NO02","id":"x","message":"no privilege"}"#,
        );

        let passed = RateLimitHandler::default()
            .on_response(endpoint(), raw)
            .expect("not throttled");
        check!(passed.status == StatusCode::FORBIDDEN);
    }

    #[test]
    fn endpoint_lookup_used_by_handlers_is_get() {
        check!(endpoint().method == Method::GET);
    }
}
