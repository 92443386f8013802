//! Typed query-parameter builder for the MoySklad JSON API.
//!
//! This module translates typed field selectors into the service's textual
//! `filter`, `order` and `expand` grammar and enforces the per-field rules the
//! service applies, at the call site rather than at the server:
//!
//! - **[`FieldMetadata`]**: which operators a field accepts, whether it may be
//!   null, repeated, nested, ordered or expanded
//! - **[`Field`] / [`FieldSelector`]**: typed references to a field of an
//!   entity, directly or one level nested
//! - **[`Assertion`]**: fluent verbs (`be`, `be_greater_than`, `contains`, ...)
//!   that validate and append [`FilterItem`]s
//! - **[`ApiParameterBuilder`]**: owns the query state and renders it through
//!   [`QueryParameters::build`]
//!
//! Every violation is reported as a [`ValidationError`] from the offending
//! call; nothing is deferred to serialization.
//!
//! # Filter grammar
//!
//! | Verb | Operator | May co-exist with on the same field |
//! |---|---|---|
//! | `be` | `=` | `=` |
//! | `not_be` | `!=` | `!=` |
//! | `be_greater_than` | `>` | `<`, `<=`, `>=` |
//! | `be_greater_or_equal_to` | `>=` | `<=`, `<`, `>` |
//! | `be_less_than` | `<` | `>`, `<=`, `>=` |
//! | `be_less_or_equal_to` | `<=` | `>=`, `<`, `>` |
//! | `contains` / `starts_with` / `ends_with` | `~` / `~=` / `=~` | nothing |
//!
//! Repeating `be` on a field reads as a logical OR; combining range verbs reads
//! as a logical AND.
//!
//! # Example
//!
//! ```rust
//! use moysklad_api::query::{ApiParameterBuilder, QueryParameters, ValidationError};
//! use moysklad_api::rest::resources::{Counterparty, KzDetails};
//!
//! # fn main() -> Result<(), ValidationError> {
//! let mut query = ApiParameterBuilder::<Counterparty>::new();
//! query.filter(Counterparty::NAME)?.starts_with("Acme")?;
//! query.filter(Counterparty::KZ_DETAILS.then(KzDetails::OKED))?.be("62010")?;
//! query.order_by_descending(Counterparty::CREATED)?;
//! query.limit(50)?;
//!
//! let params = query.build();
//! assert_eq!(params["filter"], "name~=Acme;kzDetails.oked=62010");
//! assert_eq!(params["order"], "created,desc");
//! # Ok(())
//! # }
//! ```

mod builder;
mod errors;
mod filter;
mod metadata;
mod operator;
mod order;
mod value;

pub use builder::{ApiParameterBuilder, QueryParameters, MAX_LIMIT};
pub use errors::{FieldUsage, ValidationError};
pub use filter::{Assertion, FilterItem, FilterStore};
pub use metadata::{Field, FieldDef, FieldMetadata, FieldSelector, Queryable, ResolvedField};
pub use operator::FilterOperator;
pub use order::{ExpandStore, OrderStore, SortDirection};
pub use value::{
    FieldValue, FilterValue, OrderedFilterValue, TextFilterValue, FILTER_DATE_FORMAT,
    FILTER_DATE_TIME_FORMAT,
};
