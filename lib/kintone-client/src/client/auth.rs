use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::HeaderValue;
use http::header::{AUTHORIZATION, HeaderName};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Header carrying one or more API tokens.
static API_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-cybozu-api-token");

/// Header carrying base64-encoded password credentials.
static PASSWORD_HEADER: HeaderName = HeaderName::from_static("x-cybozu-authorization");

/// Errors that can occur while turning credentials into HTTP headers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum AuthError {
    /// An API token contains characters that are invalid in an HTTP header.
    #[display("API token contains invalid characters: {message}")]
    InvalidApiToken {
        /// Description of the invalid characters.
        message: String,
    },

    /// No API token was supplied.
    #[display("At least one API token is required")]
    EmptyApiTokens,

    /// Encoded credentials could not be placed in an HTTP header.
    #[display("Credentials contain invalid characters: {message}")]
    InvalidCredentials {
        /// Description of the invalid characters.
        message: String,
    },
}

/// Secure wrapper for sensitive string data that zeroes memory on drop.
///
/// Credentials are redacted in `Debug` output and masked in `Display`, so a
/// stray log statement never leaks a token.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Creates a new secure string from the provided value.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner value.
    ///
    /// The returned reference should not be stored for extended periods to
    /// minimize exposure of sensitive data.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masks sensitive data for display purposes.
    fn mask(value: &str) -> String {
        if value.len() <= 8 {
            "***".to_string()
        } else {
            format!(
                "{}...{}",
                value.get(..4).unwrap_or_default(),
                value.get(value.len() - 4..).unwrap_or_default()
            )
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::mask(&self.0))
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

/// Authentication configuration for Kintone requests.
///
/// Configured once at client construction; the dispatcher attaches the
/// resulting headers to every exchange.
///
/// # Examples
///
/// ```rust
/// use kintone_client::Auth;
///
/// // Single API token
/// let auth = Auth::api_token("token-1");
///
/// // Several tokens on one request (cross-app record retrieval)
/// let auth = Auth::api_tokens(["token-1", "token-2"]);
///
/// // Password authentication
/// let auth = Auth::password("user", "secret");
/// ```
#[derive(Debug, Clone)]
pub enum Auth {
    /// API token authentication.
    ///
    /// Adds `X-Cybozu-API-Token: <token>[,<token>...]`.
    ApiToken {
        /// The tokens, joined with commas on the wire.
        tokens: Vec<SecureString>,
    },

    /// Password authentication.
    ///
    /// Adds `X-Cybozu-Authorization: base64(<username>:<password>)`.
    Password {
        /// The login name.
        username: String,
        /// The login password.
        password: SecureString,
    },

    /// HTTP Basic authentication (RFC 7617), for gateways placed in front of
    /// the service.
    ///
    /// Adds `Authorization: Basic base64(<username>:<password>)`.
    Basic {
        /// The Basic auth username.
        username: String,
        /// The Basic auth password.
        password: SecureString,
    },
}

impl Auth {
    /// Creates API-token authentication with a single token.
    pub fn api_token(token: impl Into<SecureString>) -> Self {
        Self::ApiToken {
            tokens: vec![token.into()],
        }
    }

    /// Creates API-token authentication with several tokens.
    pub fn api_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SecureString>,
    {
        Self::ApiToken {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates password authentication.
    pub fn password(username: impl Into<String>, password: impl Into<SecureString>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates Basic authentication.
    pub fn basic(username: impl Into<String>, password: impl Into<SecureString>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Converts the credentials into HTTP headers.
    ///
    /// Header values are marked sensitive so intermediate layers do not log
    /// them.
    pub fn to_headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>, AuthError> {
        match self {
            Self::ApiToken { tokens } => {
                if tokens.is_empty() {
                    return Err(AuthError::EmptyApiTokens);
                }
                let joined = tokens
                    .iter()
                    .map(SecureString::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                let mut value =
                    HeaderValue::from_str(&joined).map_err(|err| AuthError::InvalidApiToken {
                        message: err.to_string(),
                    })?;
                value.set_sensitive(true);
                Ok(vec![(API_TOKEN_HEADER.clone(), value)])
            }
            Self::Password { username, password } => {
                let encoded = BASE64.encode(format!("{username}:{}", password.as_str()));
                let mut value = HeaderValue::from_str(&encoded).map_err(|err| {
                    AuthError::InvalidCredentials {
                        message: err.to_string(),
                    }
                })?;
                value.set_sensitive(true);
                Ok(vec![(PASSWORD_HEADER.clone(), value)])
            }
            Self::Basic { username, password } => {
                let encoded = BASE64.encode(format!("{username}:{}", password.as_str()));
                let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(
                    |err| AuthError::InvalidCredentials {
                        message: err.to_string(),
                    },
                )?;
                value.set_sensitive(true);
                Ok(vec![(AUTHORIZATION, value)])
            }
        }
    }
}
