//! REST client implementation for the MoySklad JSON API.
//!
//! This module provides the [`RestClient`] type for making requests relative
//! to `{base_url}/{version}` with path normalization.

use std::collections::HashMap;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, MoySkladConfig};

/// REST client for the MoySklad JSON API.
///
/// Provides `get`, `post`, `put` and `delete` over an [`HttpClient`] bound to
/// `{base_url}/{version}`. Paths are relative to that root
/// (`entity/counterparty`, `report/stock/all`).
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use moysklad_api::{Credentials, MoySkladConfig, RestClient};
///
/// let config = MoySkladConfig::builder()
///     .credentials(Credentials::token("token")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let response = client.get("entity/counterparty", None).await?;
///
/// let body = serde_json::json!({"name": "Acme"});
/// let response = client.post("entity/counterparty", body, None).await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// The API version being used.
    api_version: ApiVersion,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client using the configured API version.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &MoySkladConfig) -> Result<Self, RestError> {
        Self::create_client(config, config.api_version().clone())
    }

    /// Creates a new REST client with a specific API version override.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn with_version(config: &MoySkladConfig, version: ApiVersion) -> Result<Self, RestError> {
        let config_version = config.api_version();
        if &version == config_version {
            tracing::debug!(
                "Rest client has a redundant API version override to the default {}",
                config_version
            );
        } else {
            tracing::debug!(
                "Rest client overriding default API version {} with {}",
                config_version,
                version
            );
        }

        Self::create_client(config, version)
    }

    fn create_client(config: &MoySkladConfig, api_version: ApiVersion) -> Result<Self, RestError> {
        let base_path = format!("/{api_version}");
        let http_client = HttpClient::new(base_path, config)?;

        Ok(Self {
            http_client,
            api_version,
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for transport errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut query = HashMap::new();
    /// query.insert("limit".to_string(), "50".to_string());
    /// let response = client.get("entity/product", Some(query)).await?;
    /// ```
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for transport errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Post, path, Some(body), query)
            .await
    }

    /// Sends a PUT request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for transport errors.
    pub async fn put(
        &self,
        path: &str,
        body: serde_json::Value,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Put, path, Some(body), query)
            .await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is empty.
    /// Returns [`RestError::Http`] for transport errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.make_request(HttpMethod::Delete, path, None, query)
            .await
    }

    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, &normalized_path);
        if let Some(body_value) = body {
            builder = builder.body(body_value);
        }
        if let Some(query_params) = query.filter(|q| !q.is_empty()) {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a path relative to `{base_url}/{version}`.
///
/// Leading and trailing slashes are stripped; an empty result is an error.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let normalized = path.trim().trim_matches('/');
    if normalized.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(normalized.to_string())
}
