//! The HTTP client: configuration, authentication, dispatch and response
//! handling.
//!
//! [`KintoneClient::call`] is the single dispatch path every operation goes
//! through: resolve the endpoint descriptor, encode the request (query
//! string for reads, JSON body for writes), perform exactly one transport
//! exchange, run the response handler chain in registration order, then
//! translate failures or decode the typed response. Retry and timeout
//! policy live in the transport and the handlers, never in the dispatcher.

mod app;
mod auth;
mod builder;
mod error;
mod handler;
mod path;
mod query;
mod transport;

use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};
use tracing::debug;
use url::Url;

pub use self::app::AppClient;
pub use self::auth::{Auth, AuthError, SecureString};
pub use self::builder::KintoneClientBuilder;
pub use self::error::ApiClientError;
pub use self::handler::{LoggingHandler, RateLimitHandler, RawResponse, ResponseHandler};
pub use self::path::PathTemplate;
pub use self::transport::{ReqwestTransport, Transport, TransportFuture, TransportRequest};

use crate::api::ApiRequest;

static APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// A configured client for one Kintone domain.
///
/// Cheap to clone and safe to share across tasks; all state is immutable
/// after construction. Build one with [`KintoneClientBuilder`].
///
/// # Examples
///
/// ```rust,no_run
/// use kintone_client::{Auth, KintoneClientBuilder};
///
/// # async fn example() -> Result<(), kintone_client::ApiClientError> {
/// let client = KintoneClientBuilder::new("https://example.cybozu.com")
///     .auth(Auth::api_token("token"))
///     .build()?;
///
/// let app = client.app().get_app(42).await?;
/// println!("{}", app.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KintoneClient {
    transport: Arc<dyn Transport>,
    api_base: Url,
    headers: HeaderMap,
    handlers: Arc<[Arc<dyn ResponseHandler>]>,
}

impl KintoneClient {
    /// Starts building a client for the given base URL.
    pub fn builder(base_url: impl Into<String>) -> KintoneClientBuilder {
        KintoneClientBuilder::new(base_url)
    }

    /// The app administration operations.
    pub fn app(&self) -> AppClient<'_> {
        AppClient::new(self)
    }

    /// Dispatches one request and decodes its typed response.
    ///
    /// Performs exactly one HTTP exchange per invocation. Response handlers
    /// run in registration order before status checking and decoding; a
    /// failing handler short-circuits both.
    ///
    /// # Errors
    ///
    /// Any [`ApiClientError`]: encoding failures before the exchange,
    /// transport failures during it, and remote or decoding failures after.
    pub async fn call<R: ApiRequest>(&self, request: R) -> Result<R::Response, ApiClientError> {
        let endpoint = crate::api::endpoint(R::API)?;
        let payload = serde_json::to_value(&request)?;

        let mut url = self.api_base.join(endpoint.path)?;
        let mut headers = self.headers.clone();

        let body = if endpoint.method == Method::GET {
            url.set_query(query::to_query_string(&payload)?.as_deref());
            None
        } else {
            headers.insert(CONTENT_TYPE, APPLICATION_JSON.clone());
            Some(Bytes::from(serde_json::to_vec(&payload)?))
        };

        debug!(api = ?endpoint.api, method = %endpoint.method, %url, "dispatching request");

        let exchange = TransportRequest {
            method: endpoint.method.clone(),
            url,
            headers,
            body,
        };
        let mut response = self.transport.exchange(exchange).await?;

        debug!(
            api = ?endpoint.api,
            status = %response.status,
            bytes = response.body.len(),
            "exchange complete"
        );

        for handler in self.handlers.iter() {
            response = handler.on_response(endpoint, response)?;
        }

        if !response.status.is_success() {
            return Err(error::translate_remote(&response));
        }

        let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            ApiClientError::Decode {
                path,
                error: err.into_inner(),
                body: error::truncate_body(&response.body_text()),
            }
        })
    }
}
