//! Configuration types for the MoySklad API client.
//!
//! - [`MoySkladConfig`]: credentials, endpoint and transport settings
//! - [`MoySkladConfigBuilder`]: a builder for constructing [`MoySkladConfig`]
//! - [`Credentials`] and [`AccessToken`]: bearer or basic authentication
//! - [`BaseUrl`]: a validated endpoint URL
//! - [`ApiVersion`]: the JSON API version to use
//!
//! # Example
//!
//! ```rust
//! use moysklad_api::{ApiVersion, Credentials, MoySkladConfig};
//!
//! let config = MoySkladConfig::builder()
//!     .credentials(Credentials::token("my-token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{AccessToken, BaseUrl, Credentials};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for the MoySklad API client.
///
/// `MoySkladConfig` is `Clone`, `Send`, and `Sync` and can be shared across
/// tasks.
///
/// # Example
///
/// ```rust
/// use moysklad_api::{Credentials, MoySkladConfig};
///
/// let config = MoySkladConfig::builder()
///     .credentials(Credentials::basic("admin@company", "secret").unwrap())
///     .user_agent_prefix("Warehouse-Sync/2.1")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "https://api.moysklad.ru/api/remap");
/// ```
#[derive(Clone, Debug)]
pub struct MoySkladConfig {
    credentials: Credentials,
    base_url: BaseUrl,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl MoySkladConfig {
    /// Creates a new builder for constructing a `MoySkladConfig`.
    #[must_use]
    pub fn builder() -> MoySkladConfigBuilder {
        MoySkladConfigBuilder::new()
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify MoySkladConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MoySkladConfig>();
};

/// Builder for constructing [`MoySkladConfig`] instances.
///
/// `credentials` is required. Defaults:
///
/// - `base_url`: `https://api.moysklad.ru/api/remap`
/// - `api_version`: [`ApiVersion::latest`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (the HTTP library default)
#[derive(Debug, Default)]
pub struct MoySkladConfigBuilder {
    credentials: Option<Credentials>,
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl MoySkladConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credentials (required).
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`MoySkladConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `credentials` is not set.
    pub fn build(self) -> Result<MoySkladConfig, ConfigError> {
        let credentials = self.credentials.ok_or(ConfigError::MissingRequiredField {
            field: "credentials",
        })?;

        Ok(MoySkladConfig {
            credentials,
            base_url: self.base_url.unwrap_or_default(),
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
