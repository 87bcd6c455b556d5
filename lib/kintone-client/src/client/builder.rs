use std::sync::Arc;
use std::time::Duration;

use http::header::USER_AGENT;
use http::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::auth::Auth;
use super::error::ApiClientError;
use super::handler::ResponseHandler;
use super::path::PathTemplate;
use super::transport::{ReqwestTransport, Transport};
use super::KintoneClient;

/// Identifies this crate in the `User-Agent` header unless overridden.
const DEFAULT_USER_AGENT: &str = concat!("kintone-client/", env!("CARGO_PKG_VERSION"));

/// Builder for [`KintoneClient`].
///
/// Authentication is the only required setting besides the base URL; the
/// builder refuses to produce an unauthenticated client.
///
/// # Examples
///
/// ```rust,no_run
/// use std::time::Duration;
/// use kintone_client::{Auth, KintoneClientBuilder, RateLimitHandler};
///
/// # fn example() -> Result<(), kintone_client::ApiClientError> {
/// let client = KintoneClientBuilder::new("https://example.cybozu.com")
///     .auth(Auth::password("admin", "secret"))
///     .guest_space_id(17)
///     .timeout(Duration::from_secs(30))
///     .add_response_handler(RateLimitHandler::default())
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct KintoneClientBuilder {
    base_url: String,
    auth: Option<Auth>,
    guest_space_id: Option<i64>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
    handlers: Vec<Arc<dyn ResponseHandler>>,
    transport: Option<Arc<dyn Transport>>,
}

impl KintoneClientBuilder {
    /// Starts a builder for the given base URL, e.g.
    /// `https://example.cybozu.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: None,
            guest_space_id: None,
            user_agent: None,
            timeout: None,
            default_headers: HeaderMap::new(),
            handlers: Vec::new(),
            transport: None,
        }
    }

    /// Sets the credentials attached to every request. Required.
    #[must_use]
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Routes all requests through the guest-space API prefix
    /// (`k/guest/{space}/v1/`).
    #[must_use]
    pub fn guest_space_id(mut self, space_id: i64) -> Self {
        self.guest_space_id = Some(space_id);
        self
    }

    /// Overrides the default `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the per-request timeout on the default transport. Ignored when a
    /// custom transport is supplied.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header to every request.
    #[must_use]
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    /// Appends a response handler. Handlers run on every response in the
    /// order they were added.
    #[must_use]
    pub fn add_response_handler(mut self, handler: impl ResponseHandler + 'static) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Substitutes the HTTP transport; the default is a fresh
    /// [`ReqwestTransport`].
    #[must_use]
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Validates the configuration and produces a client.
    ///
    /// # Errors
    ///
    /// [`ApiClientError::MissingAuthentication`] when no credentials were
    /// configured, [`ApiClientError::InvalidBaseUrl`] when the base URL does
    /// not parse, and auth or transport construction failures.
    pub fn build(self) -> Result<KintoneClient, ApiClientError> {
        let auth = self.auth.ok_or(ApiClientError::MissingAuthentication)?;

        let mut base = Url::parse(&self.base_url).map_err(|err| ApiClientError::InvalidBaseUrl {
            message: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiClientError::InvalidBaseUrl {
                message: format!("'{base}' cannot serve as a base URL"),
            });
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let prefix = match self.guest_space_id {
            Some(space_id) => PathTemplate::from("k/guest/{space}/v1/")
                .add_param("space", space_id)
                .resolve()?,
            None => "k/v1/".to_string(),
        };
        let api_base = base.join(&prefix)?;

        let mut headers = self.default_headers;
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        for (name, value) in auth.to_headers()? {
            headers.insert(name, value);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                Arc::new(ReqwestTransport::new(builder.build()?))
            }
        };

        Ok(KintoneClient {
            transport,
            api_base,
            headers,
            handlers: self.handlers.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn should_require_authentication() {
        let result = KintoneClientBuilder::new("https://example.cybozu.com").build();
        assert2::let_assert!(Err(ApiClientError::MissingAuthentication) = result);
    }

    #[test]
    fn should_append_default_api_prefix() {
        let client = KintoneClientBuilder::new("https://example.cybozu.com")
            .auth(Auth::api_token("token"))
            .build()
            .expect("valid configuration");
        check!(client.api_base.as_str() == "https://example.cybozu.com/k/v1/");
    }

    #[test]
    fn should_append_guest_space_prefix() {
        let client = KintoneClientBuilder::new("https://example.cybozu.com")
            .auth(Auth::api_token("token"))
            .guest_space_id(17)
            .build()
            .expect("valid configuration");
        check!(client.api_base.as_str() == "https://example.cybozu.com/k/guest/17/v1/");
    }

    #[test]
    fn should_normalize_missing_trailing_slash() {
        let client = KintoneClientBuilder::new("https://example.cybozu.com/sub")
            .auth(Auth::api_token("token"))
            .build()
            .expect("valid configuration");
        check!(client.api_base.as_str() == "https://example.cybozu.com/sub/k/v1/");
    }

    #[test]
    fn should_reject_unparsable_base_urls() {
        let result = KintoneClientBuilder::new("not a url")
            .auth(Auth::api_token("token"))
            .build();
        assert2::let_assert!(Err(ApiClientError::InvalidBaseUrl { .. }) = result);
    }

    #[test]
    fn should_attach_authentication_headers() {
        let client = KintoneClientBuilder::new("https://example.cybozu.com")
            .auth(Auth::api_token("token"))
            .build()
            .expect("valid configuration");
        check!(client.headers.contains_key("x-cybozu-api-token"));
        check!(client.headers.contains_key(USER_AGENT));
    }
}
