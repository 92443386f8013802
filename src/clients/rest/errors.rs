//! REST-specific error types for the MoySklad API client.
//!
//! - [`RestError::InvalidPath`]: a path is empty after normalization
//! - [`RestError::Http`]: wraps underlying transport errors

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for [`RestClient`](crate::clients::RestClient) operations.
///
/// # Example
///
/// ```rust
/// use moysklad_api::clients::RestError;
///
/// let error = RestError::InvalidPath { path: "/".to_string() };
/// assert!(error.to_string().contains("Invalid"));
/// ```
#[derive(Debug, Error)]
pub enum RestError {
    /// The path is empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The invalid path that was provided.
        path: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}
