//! Validated newtype wrappers for configuration values.
//!
//! Each type validates its contents on construction. Secrets are masked in
//! `Debug` output so configurations can be logged safely.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ConfigError;

/// A validated MoySklad access token, sent as `Authorization: Bearer <token>`.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `AccessToken(*****)`.
///
/// # Example
///
/// ```rust
/// use moysklad_api::AccessToken;
///
/// let token = AccessToken::new("a1b2c3").unwrap();
/// assert_eq!(token.as_ref(), "a1b2c3");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty or blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// How requests authenticate against the service.
///
/// # Example
///
/// ```rust
/// use moysklad_api::Credentials;
///
/// let basic = Credentials::basic("admin@company", "secret").unwrap();
/// assert_eq!(basic.authorization_header(), "Basic YWRtaW5AY29tcGFueTpzZWNyZXQ=");
/// assert!(!format!("{:?}", basic).contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Bearer token authentication.
    Token(AccessToken),
    /// HTTP Basic authentication with the account login and password.
    Basic {
        /// Account login (`user@company`).
        login: String,
        /// Account password.
        password: String,
    },
}

impl Credentials {
    /// Creates token credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn token(token: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self::Token(AccessToken::new(token)?))
    }

    /// Creates login/password credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLogin`] or [`ConfigError::EmptyPassword`]
    /// when either part is empty.
    pub fn basic(login: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let login = login.into();
        let password = password.into();
        if login.trim().is_empty() {
            return Err(ConfigError::EmptyLogin);
        }
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self::Basic { login, password })
    }

    /// Returns the value of the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Token(token) => format!("Bearer {}", token.as_ref()),
            Self::Basic { login, password } => {
                format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Self::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .field("password", &"*****")
                .finish(),
        }
    }
}

impl From<AccessToken> for Credentials {
    fn from(token: AccessToken) -> Self {
        Self::Token(token)
    }
}

/// A validated base URL of the JSON API, without the version segment.
///
/// Trailing slashes are removed so paths can be joined with a single `/`.
///
/// # Example
///
/// ```rust
/// use moysklad_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.moysklad.ru/api/remap/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.moysklad.ru/api/remap");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.moysklad.ru");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// The public production endpoint.
    pub const DEFAULT: &'static str = "https://api.moysklad.ru/api/remap";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host,
    /// or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() || url.contains(['?', '#']) {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: 23,
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
