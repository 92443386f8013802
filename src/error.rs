//! Configuration error types for the MoySklad API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! credentials or endpoints are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use moysklad_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid MoySklad access token.")]
    EmptyAccessToken,

    /// Login cannot be empty.
    #[error("Login cannot be empty. Please provide the MoySklad account login (e.g., 'admin@company').")]
    EmptyLogin,

    /// Password cannot be empty.
    #[error("Password cannot be empty.")]
    EmptyPassword,

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'MAJOR.MINOR' (e.g., '1.2').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.moysklad.ru/api/remap').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

// Verify ConfigError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
};
