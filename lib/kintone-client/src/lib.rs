//! # Kintone Client
//!
//! Typed async client for the Kintone app administration REST API.
//!
//! Every remote operation is a request type implementing
//! [`api::ApiRequest`]; [`KintoneClient::call`] dispatches any of them
//! through a single path (endpoint lookup, encoding, one HTTP exchange, the
//! response handler chain, decoding). [`AppClient`] wraps the common
//! operations in ergonomic methods.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kintone_client::{Auth, KintoneClientBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), kintone_client::ApiClientError> {
//! let client = KintoneClientBuilder::new("https://example.cybozu.com")
//!     .auth(Auth::api_token("api-token"))
//!     .build()?;
//!
//! let app = client.app().get_app(42).await?;
//! println!("{} (revision history at {})", app.name, app.modified_at);
//!
//! let fields = client.app().get_form_fields(42).await?;
//! for (code, field) in &fields {
//!     println!("{code}: {:?}", field.code());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pre-live settings and deployment
//!
//! Settings changes apply to an app's pre-live copy first. Read endpoints
//! come in deployed and `*_preview` pairs; updates always target the
//! pre-live copy and take effect once
//! [`AppClient::deploy_app`] finishes. Updates accept an optional expected
//! revision to detect concurrent edits, and omit every unset field so a
//! partial update never clobbers remote state.
//!
//! ## Response handlers
//!
//! Cross-cutting response behavior plugs in through [`ResponseHandler`]:
//! handlers registered on the builder run on every raw response, in order,
//! before decoding. [`RateLimitHandler`] turns throttling replies into
//! [`ApiClientError::RateLimited`]; [`LoggingHandler`] traces every
//! exchange.

pub mod api;
pub mod client;
pub mod model;

pub use client::{
    ApiClientError, AppClient, Auth, AuthError, KintoneClient, KintoneClientBuilder,
    LoggingHandler, PathTemplate, RateLimitHandler, RawResponse, ReqwestTransport,
    ResponseHandler, SecureString, Transport, TransportFuture, TransportRequest,
};
