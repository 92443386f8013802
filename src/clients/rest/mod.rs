//! REST client for the MoySklad JSON API.
//!
//! - [`RestClient`]: `get()`, `post()`, `put()`, `delete()` relative to
//!   `{base_url}/{version}`
//! - [`RestError`]: error type for REST client operations
//!
//! # Path Normalization
//!
//! Leading and trailing slashes are stripped, so `/entity/product/` and
//! `entity/product` address the same endpoint. Empty paths are rejected.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
