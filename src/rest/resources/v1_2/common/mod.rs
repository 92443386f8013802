//! Types shared across resources.
//!
//! These are not resources themselves (they don't implement `RestResource`)
//! but appear inside entities and reports: `meta` blocks, references to other
//! entities and the timestamp adapter.
//!
//! ```rust
//! use moysklad_api::rest::resources::common::{EntityRef, EntityType, Meta};
//! use uuid::Uuid;
//!
//! let agent: EntityRef = Meta::entity(
//!     "https://api.moysklad.ru/api/remap/1.2",
//!     EntityType::Counterparty,
//!     Uuid::nil(),
//! )
//! .into();
//! assert!(!agent.is_expanded());
//! ```

pub mod date;
mod meta;

pub use meta::{EntityRef, EntityType, Meta};
