//! Version-specific resource implementations.
//!
//! Resources are organized by API version:
//!
//! ```text
//! resources/
//!   mod.rs     <- This file (re-exports the current version)
//!   v1_2/
//!     mod.rs   <- Entities and reports of JSON API 1.2
//! ```
//!
//! The current version is re-exported at this level:
//!
//! ```rust
//! use moysklad_api::rest::resources::Counterparty;        // current version
//! use moysklad_api::rest::resources::v1_2::Counterparty as Counterparty12;
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use moysklad_api::query::ApiParameterBuilder;
//! use moysklad_api::rest::RestResource;
//! use moysklad_api::rest::resources::{CustomerOrder, CustomerOrderPosition};
//!
//! let order = CustomerOrder::find(&client, order_id, None).await?;
//! let positions = CustomerOrderPosition::all_in_order(&client, order_id, None).await?;
//! ```

pub mod v1_2;

pub use v1_2::*;
