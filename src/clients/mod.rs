//! HTTP client types for MoySklad JSON API communication.
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response, returned for every status code
//! - [`RateLimit`]: Rate limit information from response headers
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`rest::RestClient`]: Higher-level client bound to an API version
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::{Credentials, MoySkladConfig};
//! use moysklad_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let config = MoySkladConfig::builder()
//!     .credentials(Credentials::token("token")?)
//!     .build()?;
//! let client = HttpClient::new("/1.2", &config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "entity/product")
//!     .query_param("limit", "10")
//!     .build()?;
//! let response = client.request(request).await?;
//! ```
//!
//! # Rate Limits
//!
//! Requests are never retried. The rate limit headers are parsed into
//! [`RateLimit`] and a warning is logged through `tracing` when the remaining
//! budget drops to [`RATE_LIMIT_LOW_WATERMARK`]. A 429 response surfaces the
//! service's `X-Lognex-Retry-After` hint to the caller.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, JSON_MEDIA_TYPE, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit, RATE_LIMIT_LOW_WATERMARK};

pub use rest::{RestClient, RestError};
