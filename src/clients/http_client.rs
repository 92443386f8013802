//! HTTP client for MoySklad JSON API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the JSON API.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::{HttpResponse, RateLimit};
use crate::config::MoySkladConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Media type requested from and sent to the service.
pub const JSON_MEDIA_TYPE: &str = "application/json;charset=utf-8";

/// HTTP client for making requests to the JSON API.
///
/// The client handles:
/// - URL construction from the configured base URL and a version path
/// - Default headers including `User-Agent` and `Authorization`
/// - Transparent gzip decompression (the service requires gzip support)
/// - Rate limit header parsing
///
/// Non-2xx responses are returned as [`HttpResponse`]s, not errors. Requests
/// are never retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use moysklad_api::{Credentials, MoySkladConfig};
/// use moysklad_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = MoySkladConfig::builder()
///     .credentials(Credentials::token("token")?)
///     .build()?;
/// let client = HttpClient::new("/1.2", &config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "entity/counterparty").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://api.moysklad.ru/api/remap`).
    base_uri: String,
    /// Base path (e.g., "/1.2").
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The version path for API requests (e.g., "/1.2")
    /// * `config` - Credentials, base URL, user agent prefix and timeout
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(base_path: impl Into<String>, config: &MoySkladConfig) -> Result<Self, HttpError> {
        let base_path = base_path.into();
        let base_uri = config.base_url().as_ref().to_string();

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}MoySklad API Rust Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), JSON_MEDIA_TYPE.to_string());
        default_headers.insert(
            "Authorization".to_string(),
            config.credentials().authorization_header(),
        );

        let mut builder = reqwest::Client::builder().use_rustls_tls().gzip(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_uri,
            base_path,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the JSON API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A successful response carries a body that is not JSON (`Deserialize`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!(
            "{}{}/{}",
            self.base_uri,
            self.base_path,
            request.path.trim_start_matches('/')
        );

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), JSON_MEDIA_TYPE.to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            query = ?request.query.as_ref().map(|q| q.keys().collect::<Vec<_>>()),
            "sending request"
        );

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let body = Self::parse_body(code, &body_text)?;

        let response = HttpResponse::new(code, res_headers, body);

        if let Some(limit) = response.rate_limit.filter(RateLimit::is_low) {
            tracing::warn!(
                remaining = ?limit.remaining,
                limit = ?limit.limit,
                path = %request.path,
                "MoySklad rate limit nearly exhausted"
            );
        }
        tracing::debug!(code, path = %request.path, "received response");

        Ok(response)
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a response body.
    ///
    /// Empty bodies become `{}`. Undecodable error bodies are kept verbatim
    /// under `raw_body`; undecodable success bodies are an error.
    fn parse_body(code: u16, text: &str) -> Result<serde_json::Value, HttpError> {
        if text.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        match serde_json::from_str(text) {
            Ok(value) => Ok(value),
            Err(_) if !(200..=299).contains(&code) => Ok(serde_json::json!({ "raw_body": text })),
            Err(e) => Err(HttpError::Deserialize(e)),
        }
    }
}
