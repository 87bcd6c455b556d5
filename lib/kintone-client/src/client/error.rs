use std::time::Duration;

use serde::Deserialize;

use super::handler::RawResponse;
use crate::api::Api;

/// Maximum number of response-body bytes echoed back in error messages.
const BODY_MAX_LENGTH: usize = 1024;

/// Errors that can occur when using the Kintone client.
///
/// The variants group into four families:
///
/// - **Configuration**: [`UnknownEndpoint`](Self::UnknownEndpoint),
///   [`InvalidBaseUrl`](Self::InvalidBaseUrl),
///   [`MissingAuthentication`](Self::MissingAuthentication) and
///   [`Auth`](Self::Auth) — static wiring problems that should be caught
///   before any request is sent.
/// - **Transport**: [`Reqwest`](Self::Reqwest) — connectivity, TLS and
///   timeout failures, surfaced verbatim from the HTTP layer. The dispatcher
///   never retries; retry policy belongs in a response handler.
/// - **Remote**: [`Remote`](Self::Remote) and
///   [`RateLimited`](Self::RateLimited) — the service answered with a
///   non-success status.
/// - **Serialization**: [`Json`](Self::Json),
///   [`QueryEncoding`](Self::QueryEncoding),
///   [`UnsupportedQueryParameter`](Self::UnsupportedQueryParameter) and
///   [`Decode`](Self::Decode) — a request could not be encoded or a response
///   did not match its declared shape (schema drift is reported, never
///   silently defaulted).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// HTTP transport failure from the underlying reqwest client.
    Reqwest(reqwest::Error),

    /// URL parsing error while constructing a request URL.
    Url(url::ParseError),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error while encoding a request.
    Json(serde_json::Error),

    /// Query-string encoding error.
    QueryEncoding(serde_urlencoded::ser::Error),

    /// Authentication data could not be turned into HTTP headers.
    Auth(super::auth::AuthError),

    /// The operation key has no entry in the endpoint registry.
    ///
    /// Keys are compile-time constants, so this indicates a wiring bug in
    /// the registry table rather than a runtime condition.
    #[display("Unknown endpoint: {api:?}")]
    #[from(skip)]
    UnknownEndpoint {
        /// The operation key that was looked up.
        api: Api,
    },

    /// The configured base URL cannot be used for request construction.
    #[display("Invalid base URL: {message}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// Description of why the base URL is invalid.
        message: String,
    },

    /// No authentication was configured on the client builder.
    #[display("Authentication is required: configure an API token or password credentials")]
    MissingAuthentication,

    /// A path template still contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missing:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that could not be resolved.
        path: String,
        /// Names of the parameters that were not supplied.
        missing: Vec<String>,
    },

    /// A request field cannot be represented as a query parameter.
    ///
    /// Nested objects have no query-string encoding; such fields belong in
    /// a request body.
    #[display("Unsupported query parameter '{name}': nested objects cannot be encoded")]
    #[from(skip)]
    UnsupportedQueryParameter {
        /// Name of the offending request field.
        name: String,
    },

    /// A query-string endpoint was given a payload that is not a JSON object.
    #[display("Unsupported query payload: {value}")]
    #[from(skip)]
    UnsupportedQueryPayload {
        /// The payload that could not be flattened into query pairs.
        value: serde_json::Value,
    },

    /// The remote service reported an error.
    #[display("Remote error {code} (status {status}): {message}")]
    #[from(skip)]
    Remote {
        /// The HTTP status code of the reply.
        status: u16,
        /// The service error code, e.g. `CB_VA01`; empty when the body
        /// carried no parsable error object.
        code: String,
        /// The unique identifier of the error occurrence.
        id: String,
        /// The human-readable error message.
        message: String,
    },

    /// The remote service throttled the request.
    ///
    /// Produced by [`RateLimitHandler`](super::handler::RateLimitHandler);
    /// the plain dispatch path reports throttling as [`Remote`](Self::Remote).
    #[display("Rate limit exceeded (retry after {retry_after:?})")]
    #[from(skip)]
    RateLimited {
        /// Suggested wait time taken from the `Retry-After` header, if any.
        retry_after: Option<Duration>,
    },

    /// The response body did not match the declared response shape.
    #[display("Failed to decode response at '{path}': {error}\n{body}")]
    #[from(skip)]
    Decode {
        /// JSON path of the element that failed to deserialize.
        path: String,
        /// The underlying JSON error.
        error: serde_json::Error,
        /// The response body, truncated for readability.
        body: String,
    },
}

/// The error object Kintone places in non-success response bodies.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct RemoteErrorBody {
    #[serde(default)]
    pub(super) code: String,
    #[serde(default)]
    pub(super) id: String,
    #[serde(default)]
    pub(super) message: String,
}

/// Truncates a body for inclusion in an error message.
pub(super) fn truncate_body(text: &str) -> String {
    if text.len() > BODY_MAX_LENGTH {
        let mut end = BODY_MAX_LENGTH;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", text.get(..end).unwrap_or_default())
    } else {
        text.to_string()
    }
}

/// Default translation of a non-success reply into a typed failure.
///
/// Parses the standard `{code, id, message}` error object when present;
/// otherwise the truncated raw body becomes the message.
pub(super) fn translate_remote(response: &RawResponse) -> ApiClientError {
    let status = response.status.as_u16();
    match serde_json::from_slice::<RemoteErrorBody>(&response.body) {
        Ok(body) => ApiClientError::Remote {
            status,
            code: body.code,
            id: body.id,
            message: body.message,
        },
        Err(_) => ApiClientError::Remote {
            status,
            code: String::new(),
            id: String::new(),
            message: truncate_body(&response.body_text()),
        },
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};

    use super::*;

    #[test]
    fn api_client_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ApiClientError>();
        assert_sync::<ApiClientError>();
    }

    #[test]
    fn should_translate_structured_remote_error() {
        let response = RawResponse {
            status: StatusCode::BAD_REQUEST,
            headers: HeaderMap::new(),
            body: Bytes::from_static(
                br#"{"code":"CB_VA01","id":"abc123","message":"Missing or invalid input."}"#,
            ),
        };

        let error = translate_remote(&response);
        assert2::let_assert!(
            ApiClientError::Remote {
                status,
                code,
                id,
                message
            } = error
        );
        check!(status == 400);
        check!(code == "CB_VA01");
        check!(id == "abc123");
        check!(message == "Missing or invalid input.");
    }

    #[test]
    fn should_fall_back_to_raw_body_for_unparsable_errors() {
        let response = RawResponse {
            status: StatusCode::BAD_GATEWAY,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"<html>gateway error</html>"),
        };

        let error = translate_remote(&response);
        assert2::let_assert!(ApiClientError::Remote { status, code, message, .. } = error);
        check!(status == 502);
        check!(code.is_empty());
        check!(message.contains("gateway error"));
    }

    #[test]
    fn should_truncate_long_bodies() {
        let text = "x".repeat(5000);
        let truncated = truncate_body(&text);
        check!(truncated.len() < 1100);
        check!(truncated.ends_with("... (truncated)"));
    }
}
