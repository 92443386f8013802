//! # MoySklad API Rust Client
//!
//! A typed client for the MoySklad JSON API (`/api/remap/1.2`), built around a
//! query-parameter builder that validates filters, sorting and expansion
//! against per-field metadata before any request is sent.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MoySkladConfig`] and [`MoySkladConfigBuilder`]
//! - Validated newtypes for credentials and the endpoint URL
//! - A typed query builder ([`query::ApiParameterBuilder`]) that renders the
//!   service's `filter`, `order`, `expand`, `search`, `limit` and `offset`
//!   parameters
//! - An async HTTP client with rate limit header parsing
//! - Typed resources and reports ([`rest::resources`]) with CRUD operations
//!
//! ## Quick Start
//!
//! ```rust
//! use moysklad_api::{ApiVersion, Credentials, MoySkladConfig};
//!
//! let config = MoySkladConfig::builder()
//!     .credentials(Credentials::token("your-access-token").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Building Queries
//!
//! Fields are associated constants of each entity. Each verb checks the
//! field's metadata and fails at the offending call:
//!
//! ```rust
//! use moysklad_api::query::{ApiParameterBuilder, QueryParameters, ValidationError};
//! use moysklad_api::rest::resources::Counterparty;
//!
//! let mut query = ApiParameterBuilder::<Counterparty>::new();
//! query.filter(Counterparty::CODE).unwrap().be("foo").unwrap().be("bar").unwrap();
//! query.filter(Counterparty::ARCHIVED).unwrap().be(false).unwrap();
//!
//! // `archived` accepts a single constraint
//! assert!(matches!(
//!     query.filter(Counterparty::ARCHIVED).unwrap().be(true),
//!     Err(ValidationError::ConstraintAlreadySpecified { .. })
//! ));
//!
//! let params = query.build();
//! assert_eq!(params["filter"], "code=foo;code=bar;archived=false");
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use moysklad_api::{Credentials, MoySkladConfig, RestClient};
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::Product;
//!
//! let config = MoySkladConfig::builder()
//!     .credentials(Credentials::token("your-access-token")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let mut query = ApiParameterBuilder::<Product>::new();
//! query.filter(Product::ARCHIVED)?.be(false)?;
//! query.limit(100)?;
//!
//! let page = Product::all(&client, Some(&query)).await?;
//! println!("{} of {} products", page.len(), page.meta.size);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction and queries
//!   validate per call
//! - **Thread-safe**: Configuration and clients are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod query;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, ApiVersion, BaseUrl, Credentials, MoySkladConfig, MoySkladConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RateLimit, RestClient, RestError,
};

// Re-export the query builder entry points
pub use query::{ApiParameterBuilder, QueryParameters, ValidationError};
