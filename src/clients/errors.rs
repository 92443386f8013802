//! HTTP-specific error types for the MoySklad API client.
//!
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: unified transport error
//!
//! Non-2xx responses are not transport errors. The client returns them as
//! [`HttpResponse`](crate::clients::HttpResponse)s and the resource layer
//! translates them into [`ApiError`](crate::rest::ApiError)s.
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("{}: {}", response.code, response.body),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//!     Err(HttpError::Deserialize(e)) => println!("Bad body: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty after normalization.
    #[error("Invalid request path '{path}'.")]
    InvalidPath {
        /// The path that was provided.
        path: String,
    },
}

/// Unified error type for HTTP transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Deserialize(#[from] serde_json::Error),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InvalidHttpRequestError>();
    assert_send_sync::<HttpError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "put".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use put without specifying data.");
    }

    #[test]
    fn test_deserialize_error_wraps_serde_error() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error: HttpError = serde_error.into();
        assert!(error.to_string().starts_with("Failed to decode response body"));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let invalid = InvalidHttpRequestError::InvalidPath {
            path: String::new(),
        };
        let _: &dyn std::error::Error = &invalid;

        let http: &dyn std::error::Error = &HttpError::InvalidRequest(invalid.clone());
        let _ = http;
    }
}
